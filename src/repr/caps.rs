//! Capability sets.

prelude!();

/// A behavior contract a person may implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    Study,
    Teach,
    Research,
}

bitflags::bitflags! {
    /// Raw capability bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    struct Bits: u8 {
        const STUDY = 1;
        const TEACH = 1 << 1;
        const RESEARCH = 1 << 2;
    }
}

impl Capability {
    pub const ALL: [Capability; 3] = [Self::Study, Self::Teach, Self::Research];

    fn bit(self) -> Bits {
        match self {
            Self::Study => Bits::STUDY,
            Self::Teach => Bits::TEACH,
            Self::Research => Bits::RESEARCH,
        }
    }
}

impl Display for Capability {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Study => "study".fmt(fmt),
            Self::Teach => "teach".fmt(fmt),
            Self::Research => "research".fmt(fmt),
        }
    }
}

/// A set of [`Capability`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Caps {
    bits: Bits,
}

impl Default for Caps {
    fn default() -> Self {
        Self::NONE
    }
}

impl Caps {
    pub const NONE: Caps = Caps {
        bits: Bits::empty(),
    };

    pub fn of(caps: impl IntoIterator<Item = Capability>) -> Self {
        caps.into_iter().fold(Self::NONE, Self::with)
    }

    pub fn with(self, cap: Capability) -> Self {
        Self {
            bits: self.bits | cap.bit(),
        }
    }

    #[inline]
    pub fn has(self, cap: Capability) -> bool {
        self.bits.contains(cap.bit())
    }
    #[inline]
    pub fn is_empty(self) -> bool {
        self.bits.is_empty()
    }

    pub fn iter(self) -> impl Iterator<Item = Capability> {
        Capability::ALL.into_iter().filter(move |cap| self.has(*cap))
    }
}

impl FromIterator<Capability> for Caps {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self::of(iter)
    }
}

impl Display for Caps {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{{{}}}", self.iter().show_iter_cs(|cap| cap.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership() {
        let caps = Caps::of([Capability::Study, Capability::Research]);
        assert!(caps.has(Capability::Study));
        assert!(!caps.has(Capability::Teach));
        assert!(caps.has(Capability::Research));
        assert!(Caps::NONE.is_empty());
        assert_eq!(caps.to_string(), "{study, research}");
    }

    #[test]
    fn collect_dedups() {
        let caps: Caps = [Capability::Teach, Capability::Teach].into_iter().collect();
        assert_eq!(caps.iter().count(), 1);
        assert_eq!(caps, Caps::NONE.with(Capability::Teach));
        assert_eq!(Caps::default(), Caps::NONE);
    }
}
