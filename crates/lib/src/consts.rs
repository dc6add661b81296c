//! Fixed names and environment variables shared across the crate.

/// Env var overriding the directory that manifest paths are resolved against.
pub const MANIFEST_ROOT_ENV: &str = "DISTKIT_MANIFEST_ROOT";

/// Injected into every process by the kernel, so it never ships in a package.
pub const KERNEL_INJECTED_LIB: &str = "libzircon.so";

/// The C library name as it appears in DT_NEEDED entries.
pub const LIBC_NEEDED_NAME: &str = "libc.so";

/// The combined dynamic loader and C library artifact that `libc.so` resolves to.
pub const LIBC_RUNTIME_NAME: &str = "ld.so.1";

/// Suffix of the temporary file used for atomic writes.
pub const TMP_SUFFIX: &str = ".tmp";
