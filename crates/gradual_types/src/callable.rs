//! Runtime-validated callables.
//!
//! A [`CheckedCallable`] wraps an arbitrary callable so that arguments are
//! validated against declared input types and the return value against a
//! declared output type, at call time.

use std::fmt;

use gradual_foundation::{Error, NativeFn, Result, Value};

use crate::descriptor::Type;

/// A callable with declared input and output types.
///
/// At call time, required positional arguments are validated first, then as
/// many optional-typed slots as the extra arguments fill, then any excess
/// arguments against the variadic type (if declared). The return value is
/// validated against the output type.
pub struct CheckedCallable {
    func: Box<dyn Fn(&[Value]) -> Result<Value>>,
    output: Type,
    required: Vec<Type>,
    optional: Vec<Type>,
    variadic: Option<Type>,
}

impl CheckedCallable {
    /// Wraps a callable with the given type declarations.
    pub fn new(
        output: Type,
        required: Vec<Type>,
        optional: Vec<Type>,
        variadic: Option<Type>,
        func: impl Fn(&[Value]) -> Result<Value> + 'static,
    ) -> Self {
        Self {
            func: Box::new(func),
            output,
            required,
            optional,
            variadic,
        }
    }

    /// Wraps a [`NativeFn`] value.
    #[must_use]
    pub fn from_native(
        native: NativeFn,
        output: Type,
        required: Vec<Type>,
        optional: Vec<Type>,
        variadic: Option<Type>,
    ) -> Self {
        let func = native.func;
        Self::new(output, required, optional, variadic, move |args| func(args))
    }

    /// Description of the acceptable argument count.
    fn arity_description(&self) -> String {
        let min = self.required.len();
        let max = min + self.optional.len();
        if self.variadic.is_some() {
            format!("at least {min}")
        } else if max > min {
            format!("{min} to {max}")
        } else {
            format!("{min}")
        }
    }

    /// Invokes the callable with full argument and return validation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArityMismatch`] if the argument count cannot be
    /// matched to the declared input types, [`Error::TypeMismatch`] if any
    /// argument or the return value fails validation, or whatever error the
    /// wrapped callable itself produces.
    pub fn call(&self, args: &[Value]) -> Result<Value> {
        if args.len() < self.required.len() {
            return Err(Error::arity_mismatch(self.arity_description(), args.len()));
        }
        if self.variadic.is_none() && args.len() > self.required.len() + self.optional.len() {
            return Err(Error::arity_mismatch(self.arity_description(), args.len()));
        }

        let mut slots = self.required.iter().chain(self.optional.iter());
        for arg in args {
            let Some(ty) = slots.next().or(self.variadic.as_ref()) else {
                // Count was checked above; only reachable when variadic is
                // declared absent and the optional window was exceeded.
                return Err(Error::arity_mismatch(self.arity_description(), args.len()));
            };
            ty.check(arg)?;
        }

        let returned = (self.func)(args)?;
        self.output.validate(returned)
    }
}

impl fmt::Debug for CheckedCallable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckedCallable")
            .field("output", &self.output)
            .field("required", &self.required)
            .field("optional", &self.optional)
            .field("variadic", &self.variadic)
            .finish_non_exhaustive()
    }
}
