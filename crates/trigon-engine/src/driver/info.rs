use super::Driver;

/// Identification strings a driver can be asked for.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DriverString {
    Version,
    ShadingLanguageVersion,
    Vendor,
    Renderer,
}

/// Snapshot of the driver identification strings.
///
/// Used for diagnostics only; nothing branches on these values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriverInfo {
    pub version: String,
    pub shading_language_version: String,
    pub vendor: String,
    pub renderer: String,
}

impl DriverInfo {
    pub fn query<D: Driver + ?Sized>(driver: &D) -> Self {
        Self {
            version: driver.query_string(DriverString::Version),
            shading_language_version: driver.query_string(DriverString::ShadingLanguageVersion),
            vendor: driver.query_string(DriverString::Vendor),
            renderer: driver.query_string(DriverString::Renderer),
        }
    }

    pub fn log(&self) {
        log::info!("OpenGL version: {}", self.version);
        log::info!("GLSL version: {}", self.shading_language_version);
        log::info!("Vendor: {}", self.vendor);
        log::info!("Renderer: {}", self.renderer);
    }
}
