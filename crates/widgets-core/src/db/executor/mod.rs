mod delete;
mod load;
mod save;

pub(crate) use delete::DeleteExecutor;
pub(crate) use load::LoadExecutor;
pub use save::SaveMode;
pub(crate) use save::SaveExecutor;

use crate::{
    db::store::{DataKey, RawRow},
    error::InternalError,
    serialize::deserialize,
    traits::EntityKind,
};

// Decode a stored row, treating undecodable bytes as store corruption.
fn decode_row<E: EntityKind>(key: &DataKey, row: &RawRow) -> Result<E, InternalError> {
    let entity: E = deserialize(row.as_bytes()).map_err(|err| {
        InternalError::store_corruption(format!("failed to decode row {key}: {err}"))
    })?;

    if entity.key() != Some(key.id) {
        return Err(InternalError::store_corruption(format!(
            "row {key} decoded with mismatched key {:?}",
            entity.key()
        )));
    }

    Ok(entity)
}
