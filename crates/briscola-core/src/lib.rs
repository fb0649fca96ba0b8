pub mod calling;
pub mod game;
pub mod model;
pub mod policy;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "briscola"
    }

    pub const fn codename() -> &'static str {
        "Chiamata"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
