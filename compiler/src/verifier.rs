use tracing::debug;

use crate::{
    error::{GenError, Result},
    params::{Parameters, STRICT_KEY, TEMPLATES_KEY},
    types::Category,
    utils::quote,
};

/// Checks the template-related parameters before any file is processed.
///
/// Unknown keys are left alone: hosts commonly pass options meant for other
/// plugins in the same string.
pub fn verify_parameters(params: &Parameters) -> Result<()> {
    for (key, value) in params.iter() {
        if key == TEMPLATES_KEY {
            if value.is_empty() {
                return Err(GenError::Configuration(format!(
                    "Parameter {} needs a directory",
                    quote(key)
                )));
            }
        } else if key == STRICT_KEY {
            params.bool_or(key, true)?;
        } else if Category::from_override_key(key).is_some() {
            if value.is_empty() {
                return Err(GenError::Configuration(format!(
                    "Parameter {} needs a template path",
                    quote(key)
                )));
            }
        } else {
            debug!(key, value, "ignoring unrecognized parameter");
        }
    }
    Ok(())
}
