//! Macros for declaring closed sets of states and events.

/// Shared body of [`state_enum!`] and [`event_enum!`].
///
/// Generates the enum, its `ALL` table, `as_str`, `Display` and `FromStr`.
#[doc(hidden)]
#[macro_export]
macro_rules! __identifier_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $text:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $text)]
                $variant
            ),*
        }

        #[allow(dead_code)]
        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// Identifier used for display and storage.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),*
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::core::UnknownIdentifier;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)*
                    _ => Err($crate::core::UnknownIdentifier {
                        kind: stringify!($name),
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

/// Declare a closed state enum and implement [`State`](crate::core::State) for it.
///
/// Each variant is paired with the text identifier it is stored and
/// displayed as.
///
/// # Example
///
/// ```
/// use orderflow::core::State;
/// use orderflow::state_enum;
///
/// state_enum! {
///     pub enum JobState {
///         Queued => "queued",
///         Running => "running",
///         Done => "done",
///         Crashed => "crashed",
///     }
///     final: [Done, Crashed]
///     error: [Crashed]
/// }
///
/// assert_eq!(JobState::Running.name(), "running");
/// assert!(JobState::Crashed.is_error());
/// assert_eq!("done".parse::<JobState>().unwrap(), JobState::Done);
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $text:literal
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
        $(error: [$($error:ident),* $(,)?])?
    ) => {
        $crate::__identifier_enum! {
            $(#[$meta])*
            $vis enum $name {
                $(
                    $(#[$variant_meta])*
                    $variant => $text
                ),*
            }
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                self.as_str()
            }

            #[allow(unreachable_patterns)]
            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    _ => false,
                }
            }

            #[allow(unreachable_patterns)]
            fn is_error(&self) -> bool {
                match self {
                    $($(Self::$error => true,)*)?
                    _ => false,
                }
            }
        }
    };
}

/// Declare a closed event enum and implement [`Event`](crate::core::Event) for it.
///
/// # Example
///
/// ```
/// use orderflow::core::Event;
/// use orderflow::event_enum;
///
/// event_enum! {
///     pub enum JobEvent {
///         Start => "start",
///         Finish => "finish",
///     }
/// }
///
/// assert_eq!(JobEvent::Finish.to_string(), "finish");
/// ```
#[macro_export]
macro_rules! event_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $text:literal
            ),* $(,)?
        }
    ) => {
        $crate::__identifier_enum! {
            $(#[$meta])*
            $vis enum $name {
                $(
                    $(#[$variant_meta])*
                    $variant => $text
                ),*
            }
        }

        impl $crate::core::Event for $name {
            fn name(&self) -> &str {
                self.as_str()
            }
        }
    };
}
