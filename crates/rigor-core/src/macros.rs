/// Return an error immediately, recording the throw site.
///
/// ```ignore
/// fn parse(input: &str) -> Result<u32, ParseError> {
///     if input.is_empty() {
///         throw!(ParseError::Empty);
///     }
///     // ...
/// }
/// ```
#[macro_export]
macro_rules! throw {
    ($err:expr) => {{
        let __err = $err;
        $crate::traceback::record(
            $crate::Site::new(file!(), line!(), module_path!()),
            $crate::traceback::Cause::Throw,
            || format!("{:?}", __err),
        );
        return Err(__err);
    }};
}

/// Check a condition and return `err` if it does not hold.
///
/// Use for preconditions on externally supplied inputs — the caller is
/// allowed to get these wrong, so the failure is a recoverable error.
///
/// ```ignore
/// assume!(!buf.is_empty(), ReadFileError::EmptyBuffer);
/// ```
#[macro_export]
macro_rules! assume {
    ($cond:expr, $err:expr) => {
        if !$cond {
            let __err = $err;
            $crate::traceback::record(
                $crate::Site::new(file!(), line!(), module_path!()),
                $crate::traceback::Cause::Assume,
                || format!("{} {:?}", stringify!($cond), __err),
            );
            return Err(__err);
        }
    };
}

/// Check a condition and terminate the process if it does not hold.
///
/// Use for invariants the caller has already validated: a failure here is
/// a programming error, not an environment failure. On success the
/// traceback is reset — the path up to here turned out fine.
#[macro_export]
macro_rules! presume {
    ($cond:expr) => {
        if !$cond {
            $crate::fatal::abort($crate::traceback::Frame::new(
                $crate::Site::new(file!(), line!(), module_path!()),
                $crate::traceback::Cause::Presume,
                String::from(stringify!($cond)),
            ));
        } else {
            $crate::traceback::reset();
        }
    };
    ($cond:expr, $err:expr) => {
        if !$cond {
            $crate::fatal::abort($crate::traceback::Frame::new(
                $crate::Site::new(file!(), line!(), module_path!()),
                $crate::traceback::Cause::Presume,
                format!("{} {:?}", stringify!($cond), $err),
            ));
        } else {
            $crate::traceback::reset();
        }
    };
}

/// Terminate the process with a diagnostic, unconditionally.
#[macro_export]
macro_rules! crash {
    ($err:expr) => {
        $crate::fatal::abort($crate::traceback::Frame::new(
            $crate::Site::new(file!(), line!(), module_path!()),
            $crate::traceback::Cause::Crash,
            format!("{:?}", $err),
        ))
    };
}

/// Evaluate a `Result`, yielding the success value and terminating the
/// process on error. The runtime-assert counterpart of `?`.
///
/// ```ignore
/// let buffer = demand!(Buffer::growable(64));
/// ```
#[macro_export]
macro_rules! demand {
    ($result:expr) => {
        match $result {
            Ok(__val) => {
                $crate::traceback::reset();
                __val
            }
            Err(__err) => $crate::fatal::abort($crate::traceback::Frame::new(
                $crate::Site::new(file!(), line!(), module_path!()),
                $crate::traceback::Cause::Demand,
                format!("{} {:?}", stringify!($result), __err),
            )),
        }
    };
}

/// Dispatch on a nested operation's error, one policy per variant.
///
/// The generated `match` is exhaustive over the inner error enum, so a
/// new variant upstream is a compile error at every dispatch point.
///
/// ```ignore
/// let n = catch!(read_file(path, &mut buf), {
///     propagate ReadFileError::OpenFailed => ValidateFileError::OpenFailed,
///     propagate ReadFileError::ReadFailed => ValidateFileError::ReadFailed,
///     refuse ReadFileError::EmptyBuffer | ReadFileError::BufferTooSmall,
/// });
/// ```
///
/// Arm policies:
///
/// - `ignore Pat => expr` — treat the failure as success; the arm's
///   expression becomes the value of the `catch!`.
/// - `propagate Pat` — forward the error unchanged to the caller.
/// - `propagate Pat => expr` — forward the error remapped into the
///   caller's own error type. The mapping is declared here, 1:1, never
///   implicit.
/// - `refuse Pat` — the variant is unreachable by construction; terminate
///   the process with a diagnostic if it shows up anyway.
#[macro_export]
macro_rules! catch {
    ($result:expr, { $($arms:tt)* }) => {
        match $result {
            Ok(__val) => __val,
            Err(__err) => $crate::__catch_arms!(__err, { } $($arms)*),
        }
    };
}

/// Internal helper for `catch!` — translates policy arms into match arms.
#[doc(hidden)]
#[macro_export]
macro_rules! __catch_arms {
    // Terminal: every arm translated — emit the match.
    ($err:ident, { $($acc:tt)* }) => {
        match $err { $($acc)* }
    };

    // ── ignore ────────────────────────────────────────────────
    ($err:ident, { $($acc:tt)* } ignore $pat:pat => $val:expr, $($rest:tt)*) => {
        $crate::__catch_arms!($err, { $($acc)* $pat => $val, } $($rest)*)
    };
    ($err:ident, { $($acc:tt)* } ignore $pat:pat => $val:expr) => {
        $crate::__catch_arms!($err, { $($acc)* $pat => $val, })
    };

    // ── propagate, remapped ───────────────────────────────────
    ($err:ident, { $($acc:tt)* } propagate $pat:pat => $out:expr, $($rest:tt)*) => {
        $crate::__catch_arms!($err, { $($acc)*
            $pat => {
                let __out = $out;
                $crate::traceback::record(
                    $crate::Site::new(file!(), line!(), module_path!()),
                    $crate::traceback::Cause::Propagate,
                    || format!("{:?}", __out),
                );
                return Err(__out);
            },
        } $($rest)*)
    };
    ($err:ident, { $($acc:tt)* } propagate $pat:pat => $out:expr) => {
        $crate::__catch_arms!($err, { $($acc)*
            $pat => {
                let __out = $out;
                $crate::traceback::record(
                    $crate::Site::new(file!(), line!(), module_path!()),
                    $crate::traceback::Cause::Propagate,
                    || format!("{:?}", __out),
                );
                return Err(__out);
            },
        })
    };

    // ── propagate, unchanged ──────────────────────────────────
    ($err:ident, { $($acc:tt)* } propagate $pat:pat, $($rest:tt)*) => {
        $crate::__catch_arms!($err, { $($acc)*
            __kept @ ($pat) => {
                $crate::traceback::record(
                    $crate::Site::new(file!(), line!(), module_path!()),
                    $crate::traceback::Cause::Propagate,
                    || format!("{:?}", __kept),
                );
                return Err(__kept);
            },
        } $($rest)*)
    };
    ($err:ident, { $($acc:tt)* } propagate $pat:pat) => {
        $crate::__catch_arms!($err, { $($acc)*
            __kept @ ($pat) => {
                $crate::traceback::record(
                    $crate::Site::new(file!(), line!(), module_path!()),
                    $crate::traceback::Cause::Propagate,
                    || format!("{:?}", __kept),
                );
                return Err(__kept);
            },
        })
    };

    // ── refuse ────────────────────────────────────────────────
    ($err:ident, { $($acc:tt)* } refuse $pat:pat, $($rest:tt)*) => {
        $crate::__catch_arms!($err, { $($acc)*
            __refused @ ($pat) => $crate::fatal::abort($crate::traceback::Frame::new(
                $crate::Site::new(file!(), line!(), module_path!()),
                $crate::traceback::Cause::Refuse,
                format!("{:?}", __refused),
            )),
        } $($rest)*)
    };
    ($err:ident, { $($acc:tt)* } refuse $pat:pat) => {
        $crate::__catch_arms!($err, { $($acc)*
            __refused @ ($pat) => $crate::fatal::abort($crate::traceback::Frame::new(
                $crate::Site::new(file!(), line!(), module_path!()),
                $crate::traceback::Cause::Refuse,
                format!("{:?}", __refused),
            )),
        })
    };
}
