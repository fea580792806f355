//! Client side of the flow: choose or photograph an image, submit it to the
//! proxy and follow the analysis through to a rendered diagnosis.

pub mod analyzer;
pub mod camera;
pub mod client;
pub mod render;
pub mod selected;
pub mod session;

pub use analyzer::Analyzer;
pub use camera::{CameraError, CameraSession};
pub use client::{ClientError, ProxyClient};
pub use selected::{SelectError, SelectedImage};
pub use session::{Effect, Event, State};
