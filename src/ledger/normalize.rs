use crate::domain::{Deal, Ledger, RawDeal};
use tracing::info;

use super::SchemaError;

/// Split each raw deal's timestamp into `date` and `time` and keep the
/// analytic columns.
///
/// Rows keep their input order. A single row without a timestamp rejects the
/// whole batch.
pub fn normalize(raw: &[RawDeal]) -> Result<Ledger, SchemaError> {
    info!("Normalizing {} raw deals", raw.len());

    let deals = raw
        .iter()
        .map(|r| {
            let ts = r
                .time
                .ok_or_else(|| SchemaError::MissingColumn("time".to_string()))?;
            Ok(Deal {
                date: ts.date(),
                time: Some(ts.time()),
                deal_type: r.deal_type,
                volume: r.volume,
                position_id: r.position_id,
                price: r.price,
                commission: r.commission,
                swap: r.swap,
                profit: r.profit,
                fee: r.fee,
                symbol: r.symbol.clone(),
            })
        })
        .collect::<Result<Vec<_>, SchemaError>>()?;

    Ok(Ledger::new(deals))
}
