//! GraphQL scalar definitions.

use std::{fmt, marker::PhantomData, str::FromStr};

use juniper::{
    GraphQLType, InputValue, ParseScalarResult, ParseScalarValue, ScalarToken,
    ScalarValue, Value,
};

/// Helper type to use in `#[graphql(with = ..)]` attribute of string
/// newtypes over domain types.
///
/// Outputs the [`Display`] representation of the wrapped `As` type and parses
/// input with its [`FromStr`] impl, so the domain validation applies to
/// GraphQL input as well.
///
/// Target type must implement [`AsRef`] and [`TryFrom`] for `As` type.
///
/// [`Display`]: fmt::Display
#[derive(Debug)]
pub struct Via<As>(PhantomData<As>);

impl<As> Via<As> {
    /// Converts the target type into a string scalar [`Value`].
    pub fn to_output<T, S>(value: &T) -> Value<S>
    where
        As: fmt::Display,
        T: AsRef<As>,
        S: ScalarValue,
    {
        Value::scalar(value.as_ref().to_string())
    }

    /// Constructs the target type from a string scalar [`InputValue`].
    ///
    /// # Errors
    ///
    /// If the `input` is not a string, or the string is not a valid `As`
    /// value, or the `As` value is not a valid target value.
    pub fn from_input<T, S>(input: &InputValue<S>) -> Result<T, String>
    where
        As: FromStr,
        As::Err: fmt::Display,
        T: TryFrom<As> + GraphQLType<S, TypeInfo = ()>,
        T::Error: fmt::Display,
        S: ScalarValue,
    {
        let name = T::name(&()).unwrap_or("scalar");
        let Some(s) = input.as_string_value() else {
            return Err(format!(
                "Expected `{name}` to be a string, found: {input}",
            ));
        };
        let value = s
            .parse::<As>()
            .map_err(|e| format!("Invalid `{name}` value \"{s}\": {e}"))?;
        T::try_from(value).map_err(|e| format!("Invalid `{name}` value: {e}"))
    }

    /// Parses the provided [`ScalarToken`] as a string.
    ///
    /// # Errors
    ///
    /// If the token is not a string.
    pub fn parse_token<S: ScalarValue>(
        value: ScalarToken<'_>,
    ) -> ParseScalarResult<S> {
        <String as ParseScalarValue<S>>::from_str(value)
    }
}
