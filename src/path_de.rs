use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::InvalidInputError;

/// Deserialize with JSON-path context in error messages.
pub fn from_value_with_path<T: DeserializeOwned>(value: &Value) -> Result<T, InvalidInputError> {
    match serde_path_to_error::deserialize::<_, T>(value) {
        Ok(v) => Ok(v),
        Err(err) => {
            let path = err.path().to_string();
            Err(InvalidInputError::at(path, err.into_inner().to_string()))
        }
    }
}

pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, InvalidInputError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    match serde_path_to_error::deserialize::<_, T>(de) {
        Ok(v) => Ok(v),
        Err(err) => {
            let path = err.path().to_string();
            Err(InvalidInputError::at(path, err.into_inner().to_string()))
        }
    }
}
