//! Macros for ergonomic state declaration.

/// Declare a fieldless enum naming the states of a machine.
///
/// Variants are numbered in declaration order, so the first one is
/// `StateId(0)`. The macro generates `COUNT`, `ALL`, `name()`, `id()`,
/// `from_id()` and `From<Enum> for StateId`.
///
/// # Example
///
/// ```
/// use tickfsm::core::StateId;
/// use tickfsm::states;
///
/// states! {
///     pub enum Door {
///         Closed,
///         Opening,
///         Open,
///     }
/// }
///
/// assert_eq!(Door::COUNT, 3);
/// assert_eq!(StateId::from(Door::Open), StateId::new(2));
/// assert_eq!(Door::from_id(StateId::new(1)), Some(Door::Opening));
/// assert_eq!(Door::Closed.name(), "Closed");
/// ```
#[macro_export]
macro_rules! states {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),+
        }

        impl $name {
            /// Every state, in id order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Number of states.
            pub const COUNT: usize = Self::ALL.len();

            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),+
                }
            }

            pub fn id(self) -> $crate::core::StateId {
                $crate::core::StateId::new(self as usize)
            }

            pub fn from_id(id: $crate::core::StateId) -> ::core::option::Option<Self> {
                Self::ALL.get(id.index()).copied()
            }
        }

        impl ::core::convert::From<$name> for $crate::core::StateId {
            fn from(state: $name) -> Self {
                state.id()
            }
        }
    };
}
