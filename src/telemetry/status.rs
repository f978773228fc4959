// Interface status: ifDescr walk zipped with ifOperStatus walk

use crate::models::{InterfaceState, InterfaceStatus};
use crate::transport::VarBind;

/// Pairs rows positionally, truncated to the shorter walk.
pub fn map_status(names: &[VarBind], codes: &[VarBind]) -> InterfaceStatus {
    if names.len() != codes.len() {
        tracing::debug!(
            names = names.len(),
            codes = codes.len(),
            "interface walks differ in length; truncating"
        );
    }
    names
        .iter()
        .zip(codes)
        .map(|(name, code)| (name.value.clone(), InterfaceState::from_code(&code.value)))
        .collect()
}
