pub mod camera;
pub mod clock;
pub mod input_adapter;
pub mod intersect;
pub mod keyboard;
pub mod measure;
pub mod viewport;

pub use camera::{CameraController, MouseButtons, MouseMode, SpeedModifiers};
pub use clock::Stopwatch;
pub use input_adapter::WinitInput;
pub use intersect::{intersect_plane, PlaneHit};
pub use keyboard::{Key, KeyState};
pub use measure::MeasurementSession;
pub use viewport::ViewportState;
