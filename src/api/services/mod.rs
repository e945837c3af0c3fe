pub mod health;
pub mod pixel;
pub mod redirect;
pub mod tracking;

pub use health::HealthService;
pub use pixel::PixelService;
pub use redirect::RedirectService;
pub use tracking::TrackingService;
