use std::{error, fmt};

/// Failures while bringing up the window, GPU and worker pool.
#[derive(Debug)]
pub enum Error {
    WindowCreation(winit::error::OsError),
    NoAdapter,
    RequestDevice(wgpu::RequestDeviceError),
    NoSurfaceFormat,
    WorkerPool(rayon::ThreadPoolBuildError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WindowCreation(err) => write!(f, "failed to create window: {}", err),
            Self::NoAdapter => write!(f, "no graphics adapter can present to this window"),
            Self::RequestDevice(err) => write!(f, "failed to open graphics device: {}", err),
            Self::NoSurfaceFormat => write!(f, "window surface supports no texture formats"),
            Self::WorkerPool(err) => write!(f, "failed to start render workers: {}", err),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::WindowCreation(err) => Some(err),
            Self::RequestDevice(err) => Some(err),
            Self::WorkerPool(err) => Some(err),
            Self::NoAdapter | Self::NoSurfaceFormat => None,
        }
    }
}

impl From<winit::error::OsError> for Error {
    fn from(err: winit::error::OsError) -> Self {
        Self::WindowCreation(err)
    }
}

impl From<wgpu::RequestDeviceError> for Error {
    fn from(err: wgpu::RequestDeviceError) -> Self {
        Self::RequestDevice(err)
    }
}

impl From<rayon::ThreadPoolBuildError> for Error {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Self::WorkerPool(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            Error::NoAdapter.to_string(),
            "no graphics adapter can present to this window"
        );
        assert_eq!(
            Error::NoSurfaceFormat.to_string(),
            "window surface supports no texture formats"
        );
    }

    #[test]
    fn setup_errors_have_no_source() {
        assert!(error::Error::source(&Error::NoAdapter).is_none());
    }
}
