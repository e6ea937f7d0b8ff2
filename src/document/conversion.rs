// Author: Dustin Pilgrim
// License: MIT

use crate::ast::{Layer, Node};
use crate::NdfError;

fn value_text(node: &Node, expected: &str) -> Result<String, NdfError> {
    node.value().map(str::to_string).ok_or_else(|| {
        NdfError::type_error(
            format!("Expected {}, but node '{}' has no value", expected, node.key().unwrap_or_default()),
            "Give the key a value with `Key:value;`",
            402,
        )
    })
}

impl TryFrom<&Node> for String {
    type Error = NdfError;

    fn try_from(node: &Node) -> Result<Self, Self::Error> {
        value_text(node, "string")
    }
}

impl TryFrom<&Node> for bool {
    type Error = NdfError;

    fn try_from(node: &Node) -> Result<Self, Self::Error> {
        let text = value_text(node, "boolean")?;
        match text.trim().to_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(NdfError::type_error(
                format!("Invalid boolean value '{}'", text),
                "Use true or false",
                404,
            )),
        }
    }
}

macro_rules! impl_numeric_conversion {
    ($($ty:ty),* $(,)?) => {
        $(
            impl TryFrom<&Node> for $ty {
                type Error = NdfError;

                fn try_from(node: &Node) -> Result<Self, Self::Error> {
                    let text = value_text(node, stringify!($ty))?;
                    text.trim().parse::<$ty>().map_err(|e| {
                        NdfError::type_error(
                            format!("Invalid {} '{}': {}", stringify!($ty), text, e),
                            concat!("Use a value that fits in ", stringify!($ty)),
                            403,
                        )
                    })
                }
            }
        )*
    };
}

impl_numeric_conversion!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);

/// Lists come either inline as `Key:[1,2,3];` or as the child nodes of a
/// block, read across all layers in order.
impl<T> TryFrom<&Node> for Vec<T>
where
    T: for<'n> TryFrom<&'n Node, Error = NdfError>,
{
    type Error = NdfError;

    fn try_from(node: &Node) -> Result<Self, Self::Error> {
        if node.children.is_empty() {
            let text = value_text(node, "list")?;
            let inner = text
                .trim()
                .strip_prefix('[')
                .and_then(|rest| rest.strip_suffix(']'))
                .ok_or_else(|| {
                    NdfError::type_error(
                        format!("Expected list, got '{}'", text),
                        "Write inline lists as [a,b,c] or use a block of entries",
                        405,
                    )
                })?;

            return inner
                .split(',')
                .filter(|item| !item.is_empty())
                .map(|item| T::try_from(&Node::new(String::new(), Some(item.to_string()))))
                .collect();
        }

        node.children
            .iter()
            .flat_map(Layer::nodes)
            .map(|child| T::try_from(child))
            .collect()
    }
}

// A blanket `Option<T>` impl would overlap with `From<T> for Option<T>`
// at `T = &Node`, so the optional forms are spelled out per type.
macro_rules! impl_optional_conversion {
    ($($ty:ty),* $(,)?) => {
        $(
            impl TryFrom<&Node> for Option<$ty> {
                type Error = NdfError;

                fn try_from(node: &Node) -> Result<Self, Self::Error> {
                    if node.value.is_none() {
                        return Ok(None);
                    }
                    <$ty>::try_from(node).map(Some)
                }
            }
        )*
    };
}

impl_optional_conversion!(String, bool, u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);
