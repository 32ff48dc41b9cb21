//! defmt logging shims. Without the `defmt` feature these expand to nothing,
//! so host builds don't need a global logger.

macro_rules! log_debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "defmt")]
        {
            ::defmt::debug!($($arg)*)
        }
    };
}

macro_rules! log_info {
    ($($arg:tt)*) => {
        #[cfg(feature = "defmt")]
        {
            ::defmt::info!($($arg)*)
        }
    };
}

macro_rules! log_warn {
    ($($arg:tt)*) => {
        #[cfg(feature = "defmt")]
        {
            ::defmt::warn!($($arg)*)
        }
    };
}

pub(crate) use {log_debug, log_info, log_warn};
