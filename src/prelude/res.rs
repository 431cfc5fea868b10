//! Result-handling types/traits/macros.

prelude! {}

#[macro_export]
macro_rules! error {
    ( $fmt_head:literal $(, $fmt_args:expr)* $(,)? ) => {
        $crate::prelude::res::Error::from(format!(
            $fmt_head $(, $fmt_args)*
        ))
    };
    ( @unknown($desc:expr) $val:expr ) => {
        $crate::prelude::res::Error::from(
            $crate::prelude::res::ErrorSrc::new_unknown($val, $desc)
        )
    };
    ( @redef($desc:expr) $val:expr ) => {
        $crate::prelude::res::Error::from(
            $crate::prelude::res::ErrorSrc::new_redef($val, $desc)
        )
    };
    ( @invalid($desc:expr) $val:expr ) => {
        $crate::prelude::res::Error::from(
            $crate::prelude::res::ErrorSrc::new_invalid($val, $desc)
        )
    };
    ( @in_use($desc:expr) $val:expr ) => {
        $crate::prelude::res::Error::from(
            $crate::prelude::res::ErrorSrc::new_in_use($val, $desc)
        )
    };
    ($e:expr) => {
        $crate::prelude::res::Error::from(
            $crate::prelude::res::ErrorSrc::from($e)
        )
    };
    ($($unexpected:tt)*) => {
        compile_error!(
            "expected println!-like string interpolation \
            or an expression convertible `Into` an error"
        )
    };
}

#[macro_export]
macro_rules! bail {
    ($($input:tt)+) => {
        return $crate::prelude::Res::Err($crate::error!($($input)+))
    };
}

/// Error taxonomy.
///
/// Every failing service operation maps to exactly one of these: duplicate ids are [`Self::Redef`],
/// missing ids are [`Self::Unknown`], out-of-range values are [`Self::Invalid`], and guarded
/// removals are [`Self::InUse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorSrc {
    Msg(String),
    Unknown { val: String, desc: String },
    Redef { val: String, desc: String },
    Invalid { val: String, desc: String },
    InUse { val: String, desc: String },
}
impl ErrorSrc {
    pub fn new_msg(s: impl Into<String>) -> Self {
        Self::Msg(s.into())
    }
    pub fn new_unknown(val: impl Into<String>, desc: impl Into<String>) -> Self {
        Self::Unknown {
            val: val.into(),
            desc: desc.into(),
        }
    }
    pub fn new_redef(val: impl Into<String>, desc: impl Into<String>) -> Self {
        Self::Redef {
            val: val.into(),
            desc: desc.into(),
        }
    }
    pub fn new_invalid(val: impl Into<String>, desc: impl Into<String>) -> Self {
        Self::Invalid {
            val: val.into(),
            desc: desc.into(),
        }
    }
    pub fn new_in_use(val: impl Into<String>, desc: impl Into<String>) -> Self {
        Self::InUse {
            val: val.into(),
            desc: desc.into(),
        }
    }
}
impl From<String> for ErrorSrc {
    fn from(s: String) -> Self {
        Self::Msg(s)
    }
}
impl From<&'_ str> for ErrorSrc {
    fn from(s: &str) -> Self {
        Self::Msg(s.into())
    }
}
impl From<regex::Error> for ErrorSrc {
    fn from(e: regex::Error) -> Self {
        Self::Msg(e.to_string())
    }
}

impl Display for ErrorSrc {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ErrorSrc::*;
        match self {
            Msg(blah) => {
                for (idx, line) in blah.lines().enumerate() {
                    if idx > 0 {
                        writeln!(fmt)?;
                    }
                    line.fmt(fmt)?;
                }
                Ok(())
            }
            Unknown { val, desc } => {
                write!(fmt, "unknown {} `{}`", desc, val)
            }
            Redef { val, desc } => {
                write!(fmt, "illegal redefinition of {} `{}`", desc, val)
            }
            Invalid { val, desc } => {
                write!(fmt, "invalid {} `{}`", desc, val)
            }
            InUse { val, desc } => {
                write!(fmt, "{} `{}` is still in use", desc, val)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub enum ErrorCtx {
    Msg(String),
}
impl ErrorCtx {
    pub fn new_msg(s: impl Into<String>) -> Self {
        Self::Msg(s.into())
    }
}
impl From<String> for ErrorCtx {
    fn from(s: String) -> Self {
        Self::new_msg(s)
    }
}
impl From<&'_ str> for ErrorCtx {
    fn from(s: &str) -> Self {
        Self::new_msg(s)
    }
}
impl Display for ErrorCtx {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ErrorCtx::*;
        match self {
            Msg(blah) => {
                for (idx, line) in blah.lines().enumerate() {
                    if idx > 0 {
                        writeln!(fmt)?;
                    }
                    line.fmt(fmt)?;
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct Error {
    pub src: ErrorSrc,
    pub ctx: Vec<ErrorCtx>,
}
impl<T> From<T> for Error
where
    T: Into<ErrorSrc>,
{
    fn from(t: T) -> Self {
        Self {
            src: t.into(),
            ctx: vec![],
        }
    }
}
impl Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.src.fmt(fmt)?;
        for ctx in self.ctx.iter() {
            writeln!(fmt)?;
            ctx.fmt(fmt)?;
        }
        Ok(())
    }
}
impl std::error::Error for Error {}

impl Error {
    pub fn is_unknown(&self) -> bool {
        matches!(self.src, ErrorSrc::Unknown { .. })
    }
    pub fn is_redef(&self) -> bool {
        matches!(self.src, ErrorSrc::Redef { .. })
    }
    pub fn is_invalid(&self) -> bool {
        matches!(self.src, ErrorSrc::Invalid { .. })
    }
    pub fn is_in_use(&self) -> bool {
        matches!(self.src, ErrorSrc::InUse { .. })
    }
}

pub type Res<T> = Result<T, Error>;

pub trait WithCtx: Sized {
    type Output;
    fn context<E>(self, ctx: impl FnOnce() -> E) -> Self::Output
    where
        E: Into<ErrorCtx>;
    fn with_context(self, ctx: impl Into<ErrorCtx>) -> Self::Output {
        self.context(|| ctx)
    }
}

impl WithCtx for ErrorSrc {
    type Output = Error;
    fn context<E>(self, ctx: impl FnOnce() -> E) -> Self::Output
    where
        E: Into<ErrorCtx>,
    {
        Error {
            src: self,
            ctx: vec![ctx().into()],
        }
    }
}
impl WithCtx for Error {
    type Output = Error;
    fn context<E>(mut self, ctx: impl FnOnce() -> E) -> Self::Output
    where
        E: Into<ErrorCtx>,
    {
        self.ctx.push(ctx().into());
        self
    }
}
impl<T, E> WithCtx for Result<T, E>
where
    E: Into<Error>,
{
    type Output = Res<T>;
    fn context<Er>(self, ctx: impl FnOnce() -> Er) -> Self::Output
    where
        Er: Into<ErrorCtx>,
    {
        self.map_err(|err| err.into().context(ctx))
    }
}

#[cfg(test)]
mod tests {
    prelude! {}

    fn refuse(id: &str) -> Res<()> {
        bail!(@redef("course") id)
    }

    #[test]
    fn context_lines_follow_source() {
        let err = refuse("C1")
            .with_context("creating course")
            .unwrap_err();
        assert!(err.is_redef());
        assert_eq!(
            err.to_string(),
            "illegal redefinition of course `C1`\ncreating course"
        );
    }

    #[test]
    fn formatted_messages() {
        let err = error!("term {} is out of range", 11);
        assert_eq!(err.to_string(), "term 11 is out of range");
        let err = error!(@in_use("course") "C1");
        assert!(err.is_in_use());
        assert_eq!(err.to_string(), "course `C1` is still in use");
    }
}
