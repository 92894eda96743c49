//! The `pattern!` macro.

/// Build a [`Pattern`](crate::Pattern) from object-literal syntax.
///
/// | Syntax              | Pattern                              |
/// |---------------------|--------------------------------------|
/// | `String`            | `Pattern::AnyString`                 |
/// | `Number`            | `Pattern::AnyNumber`                 |
/// | `Boolean`           | `Pattern::AnyBoolean`                |
/// | `undefined`         | `Pattern::Undefined`                 |
/// | `null`              | `Pattern::Literal(Literal::Null)`    |
/// | `[p]`               | `Pattern::Sequence(p)`               |
/// | `{ key: p, .. }`    | `Pattern::Object` (ident or string keys) |
/// | any other expression | `Pattern::from(expr)`               |
///
/// Field values are single token trees: wrap negative numbers or compound
/// expressions in parentheses, e.g. `{ offset: (-1) }`.
///
/// ```
/// use shape_pattern::{pattern, Pattern};
///
/// let blogs = pattern!([{ Id: Number, Title: String }]);
/// assert_eq!(blogs.to_string(), "[{Id: Number, Title: String}]");
///
/// let some = pattern!({ kind: "some" });
/// assert_eq!(some, Pattern::object([("kind", "some")]));
/// ```
#[macro_export]
macro_rules! pattern {
    (@key $key:ident) => {
        ::std::string::String::from(::std::stringify!($key))
    };
    (@key $key:literal) => {
        ::std::string::String::from($key)
    };
    (String) => {
        $crate::Pattern::AnyString
    };
    (Number) => {
        $crate::Pattern::AnyNumber
    };
    (Boolean) => {
        $crate::Pattern::AnyBoolean
    };
    (undefined) => {
        $crate::Pattern::Undefined
    };
    (null) => {
        $crate::Pattern::Literal($crate::Literal::Null)
    };
    ([ $($element:tt)+ ]) => {
        $crate::Pattern::Sequence(::std::boxed::Box::new($crate::pattern!($($element)+)))
    };
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::Pattern::Object(::std::vec![
            $( ($crate::pattern!(@key $key), $crate::pattern!($value)) ),*
        ])
    };
    (( $($inner:tt)+ )) => {
        $crate::pattern!($($inner)+)
    };
    ($other:expr) => {
        $crate::Pattern::from($other)
    };
}
