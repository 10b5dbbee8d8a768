use crate::device::{ContextInit, GraphicsContext};
use crate::driver::{Driver, DriverInfo};
use crate::frame::{FrameLoop, FrameReport, Presenter};

use super::{check_version, Scene, SceneConfig, SetupError};

/// Top-level configuration.
#[derive(Debug, Clone, Default)]
pub struct HarnessConfig {
    pub context: ContextInit,
    pub scene: SceneConfig,
}

/// Opens the window, builds the scene and renders until the user quits.
///
/// Any error is a setup failure: the frame loop was never entered and
/// everything created so far has been released.
pub fn run(config: &HarnessConfig) -> Result<FrameReport, SetupError> {
    let mut ctx = GraphicsContext::create(&config.context)?;

    let report = {
        let (driver, surface) = ctx.split();
        drive(driver, surface, &config.scene)?
    };

    ctx.destroy();
    Ok(report)
}

/// Logs the driver identification strings, then checks the context version.
///
/// The strings are logged even when the version is too old.
pub fn identify_driver<D: Driver + ?Sized>(
    driver: &D,
    required: (u32, u32),
    found: (u32, u32),
) -> Result<DriverInfo, SetupError> {
    let info = DriverInfo::query(driver);
    info.log();
    check_version(required, found)?;
    Ok(info)
}

/// Builds the scene on `driver` and runs the frame loop against `presenter`.
pub fn drive<D, P>(driver: &D, presenter: &mut P, scene: &SceneConfig) -> Result<FrameReport, SetupError>
where
    D: Driver + ?Sized,
    P: Presenter + ?Sized,
{
    let scene = Scene::build(driver, scene)?;
    Ok(FrameLoop::new(scene).run(driver, presenter))
}
