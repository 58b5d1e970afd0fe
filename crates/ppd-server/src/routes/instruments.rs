use axum::Json;
use axum::extract::Path;
use serde::Serialize;

use ppd_instruments::error::InstrumentError;
use ppd_instruments::scoring::Question;
use ppd_instruments::{all_instruments, get_instrument};

use crate::error::ApiError;

#[derive(Serialize)]
pub struct InstrumentSummary {
    id: String,
    name: String,
}

#[derive(Serialize)]
pub struct InstrumentDetail {
    id: String,
    name: String,
    instructions: String,
    max_total: u32,
    questions: Vec<Question>,
}

pub async fn list_instruments() -> Json<Vec<InstrumentSummary>> {
    let instruments: Vec<InstrumentSummary> = all_instruments()
        .iter()
        .map(|i| InstrumentSummary {
            id: i.id().to_string(),
            name: i.name().to_string(),
        })
        .collect();
    Json(instruments)
}

pub async fn get_instrument_detail(
    Path(id): Path<String>,
) -> Result<Json<InstrumentDetail>, ApiError> {
    let instrument = get_instrument(&id).ok_or(InstrumentError::UnknownInstrument(id))?;

    Ok(Json(InstrumentDetail {
        id: instrument.id().to_string(),
        name: instrument.name().to_string(),
        instructions: instrument.instructions().to_string(),
        max_total: instrument.max_total(),
        questions: instrument.questions().to_vec(),
    }))
}
