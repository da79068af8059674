mod intent;
mod reducer;
mod state;

pub use intent::BindingIntent;
pub use reducer::BindingReducer;
pub use state::{BindingState, Settlement};
