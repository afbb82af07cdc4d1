//! Exit code constants for the docker-builder CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid config, unresolvable path)
//! - 2: Template failure (missing Dockerfile, unresolved reference, unreadable variables)
//! - 3: Staging failure (build context could not be reset or populated)
//! - 4: Build tool failure (launch failure or non-zero exit)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid configuration, or path resolution failure.
pub const USER_ERROR: i32 = 1;

/// Template failure: the Dockerfile could not be materialized from the source.
pub const TEMPLATE_FAILURE: i32 = 2;

/// Staging failure: filesystem error while preparing the build context.
pub const STAGING_FAILURE: i32 = 3;

/// Build tool failure: the external image build tool failed or could not start.
pub const BUILD_TOOL_FAILURE: i32 = 4;
