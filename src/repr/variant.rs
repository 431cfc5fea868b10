//! Person variants and their fixed capability sets.

prelude! {
    repr::caps::{Capability, Caps},
}

macro_rules! variants {
    ( $(
        $(#[$meta:meta])*
        $variant:ident = $label:literal with [ $($cap:ident),* $(,)? ]
    ),* $(,)? ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum Variant {
            $( $(#[$meta])* $variant, )*
        }

        impl Variant {
            /// Lists all variants in declaration order.
            pub fn all() -> impl Iterator<Item = Variant> {
                [ $( Self::$variant, )* ].into_iter()
            }

            /// Label used for display and for per-variant statistics.
            pub fn label(self) -> &'static str {
                match self {
                    $( Self::$variant => $label, )*
                }
            }

            /// Capabilities every person of this variant has.
            pub fn caps(self) -> Caps {
                match self {
                    $( Self::$variant => Caps::of([ $( Capability::$cap, )* ]), )*
                }
            }
        }
    };
}

variants! {
    /// Plain undergraduate student.
    Undergrad = "Undergraduate Student" with [Study],
    /// Student who also assists in some courses.
    Assistant = "Teaching Assistant" with [Study, Teach],
    /// Master's-level graduate student.
    Graduate = "Graduate Student" with [Study, Research],
    /// Doctoral student, researches and teaches.
    Doctoral = "Doctoral Student" with [Study, Research, Teach],
    /// Graduate working as faculty, does not study.
    Staff = "Graduate/Professor" with [Teach, Research],
}

impl Variant {
    pub fn is_student(self) -> bool {
        self.caps().has(Capability::Study)
    }
}

impl Display for Variant {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        self.label().fmt(fmt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_table() {
        use Capability::*;
        let table: Vec<(Variant, Vec<Capability>)> = Variant::all()
            .map(|v| (v, v.caps().iter().collect()))
            .collect();
        assert_eq!(
            table,
            vec![
                (Variant::Undergrad, vec![Study]),
                (Variant::Assistant, vec![Study, Teach]),
                (Variant::Graduate, vec![Study, Research]),
                (Variant::Doctoral, vec![Study, Teach, Research]),
                (Variant::Staff, vec![Teach, Research]),
            ]
        );
        assert!(!Variant::Staff.is_student());
    }
}
