pub mod remote;
pub mod state;

pub use remote::{fetch_outputs, get_state};
pub use state::{OutputMap, OutputValue, TerraformState};
