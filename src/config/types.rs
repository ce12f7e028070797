use langstrip_remux::RemuxSettings;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub remux: RemuxSettings,
}
