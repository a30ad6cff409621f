//! `op`/`event` logging macros
//!
//! Every line carries `component`, `op` and `event`; any further
//! `name = value` fields are passed straight to `tracing`.
//!
//! ```
//! # use ncpath_core::{log_op_end, log_op_error, log_op_start, errors::NcError};
//! log_op_start!("get_config", path = "router/interface");
//! log_op_end!("get_config", duration_ms = 42);
//! let err = NcError::PathNotFound { segment: "router".into(), parent: "/".into() };
//! log_op_error!("get_config", err, duration_ms = 10);
//! ```

#[doc(hidden)]
#[macro_export]
macro_rules! __nc_op_event {
    ($level:ident, $op:expr, $event:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = $event,
            $($($field)*)?
        )
    };
}

/// `event=start` at info
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__nc_op_event!(
            info,
            $op,
            $crate::ncpath_core_types::schema::EVENT_START
            $(, $($field)*)?
        )
    };
}

/// `event=end` at info; callers pass `duration_ms`
#[macro_export]
macro_rules! log_op_end {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__nc_op_event!(
            info,
            $op,
            $crate::ncpath_core_types::schema::EVENT_END
            $(, $($field)*)?
        )
    };
}

/// `event=end_error` at error, with the `NcError` kind, code and message
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr $(, $($field:tt)*)?) => {{
        let nc_err: &$crate::errors::NcError = &$err;
        $crate::__nc_op_event!(
            error,
            $op,
            $crate::ncpath_core_types::schema::EVENT_END_ERROR,
            err.kind = ?nc_err.kind(),
            err.code = nc_err.code(),
            err.message = %nc_err,
            $($($field)*)?
        )
    }};
}
