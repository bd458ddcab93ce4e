pub mod app;
pub mod carousel;
pub mod event;
pub mod input;
pub mod surface;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use carousel::Carousel;
pub use surface::CanvasSurface;
pub use theme::Theme;
