use std::fmt;

use crate::driver::{Driver, ProgramHandle, ShaderHandle};

/// Color attachment the fragment output is bound to.
pub const FRAG_OUTPUT_SLOT: u32 = 0;

/// A program that failed to link.
///
/// The program object is still allocated on the driver side; whoever receives
/// this error owns it and must release it (see [`LinkError::release`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkError {
    pub log: String,
    allocated: ProgramHandle,
}

impl LinkError {
    /// Handle value standing in for the failed program.
    #[inline]
    pub fn handle(&self) -> ProgramHandle {
        ProgramHandle::NULL
    }

    /// The unusable program object left behind by the failed link.
    #[inline]
    pub fn allocated(&self) -> ProgramHandle {
        self.allocated
    }

    /// Deletes the unusable program object.
    pub fn release<D: Driver + ?Sized>(&self, driver: &D) {
        if !self.allocated.is_null() {
            driver.delete_program(self.allocated);
        }
    }
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let log = self.log.trim_end();
        if log.is_empty() {
            write!(f, "failed to link shaders (no log)")
        } else {
            write!(f, "failed to link shaders: {log}")
        }
    }
}

impl std::error::Error for LinkError {}

/// Links vertex + fragment shader objects into a program.
pub struct ProgramLinker<'d, D: Driver + ?Sized> {
    driver: &'d D,
}

impl<'d, D: Driver + ?Sized> ProgramLinker<'d, D> {
    pub fn new(driver: &'d D) -> Self {
        Self { driver }
    }

    /// Creates a program, attaches both stages, binds `frag_output` to color
    /// slot 0 and links.
    ///
    /// Inputs are not validated: a null stage is handed to the driver as-is
    /// and comes back as a link failure. Shaders stay attached on success.
    pub fn link(
        &self,
        vertex: ShaderHandle,
        fragment: ShaderHandle,
        frag_output: &str,
    ) -> Result<ProgramHandle, LinkError> {
        let program = self.driver.create_program().map_err(|log| LinkError {
            log,
            allocated: ProgramHandle::NULL,
        })?;

        self.driver.attach_shader(program, vertex);
        self.driver.attach_shader(program, fragment);
        self.driver
            .bind_frag_data_location(program, FRAG_OUTPUT_SLOT, frag_output);
        self.driver.link_program(program);

        if self.driver.program_link_status(program) {
            log::debug!("linked {program:?} from {vertex:?} + {fragment:?}");
            return Ok(program);
        }

        let err = LinkError {
            log: self.driver.program_info_log(program),
            allocated: program,
        };
        log::error!("{err}");
        Err(err)
    }
}
