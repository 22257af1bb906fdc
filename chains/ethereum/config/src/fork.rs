//! Fork markers, per network activation schedules and the rule set derived from them.
//!
//! Everything in this module is a pure function of its inputs. The result for a given
//! `(schedule, block)` pair never depends on wall clock time, randomness or global state:
//! two validators disagreeing here would be a consensus split.

use core::{cmp::Ordering, fmt};

/// Named protocol rule change, listed in canonical activation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Fork {
    Homestead,
    /// TheDAO irregular state change. Reaching the block only applies the change on
    /// networks that support it.
    DaoFork,
    /// Tangerine Whistle gas repricing.
    Eip150,
    /// Replay protected signatures.
    Eip155,
    /// Spurious Dragon state clearing.
    Eip158,
    Byzantium,
    Constantinople,
    Petersburg,
    Istanbul,
    MuirGlacier,
    YoloV1,
    Ewasm,
}

impl Fork {
    pub const ALL: [Self; 12] = [
        Self::Homestead,
        Self::DaoFork,
        Self::Eip150,
        Self::Eip155,
        Self::Eip158,
        Self::Byzantium,
        Self::Constantinople,
        Self::Petersburg,
        Self::Istanbul,
        Self::MuirGlacier,
        Self::YoloV1,
        Self::Ewasm,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Homestead => "homestead",
            Self::DaoFork => "daoFork",
            Self::Eip150 => "eip150",
            Self::Eip155 => "eip155",
            Self::Eip158 => "eip158",
            Self::Byzantium => "byzantium",
            Self::Constantinople => "constantinople",
            Self::Petersburg => "petersburg",
            Self::Istanbul => "istanbul",
            Self::MuirGlacier => "muirGlacier",
            Self::YoloV1 => "yoloV1",
            Self::Ewasm => "ewasm",
        }
    }

    const fn bit(self) -> u32 {
        1 << self as u32
    }
}

impl fmt::Display for Fork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Orders two activation heights, `None` (never scheduled) sorts after every height.
#[must_use]
pub fn cmp_activation(a: Option<u64>, b: Option<u64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// A fork marker together with its activation height on one network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForkActivation {
    pub fork: Fork,
    /// `None` means the fork is not scheduled on this network, `Some(0)` means it is active
    /// from genesis.
    pub block: Option<u64>,
}

impl ForkActivation {
    #[must_use]
    pub const fn at(fork: Fork, block: u64) -> Self {
        Self { fork, block: Some(block) }
    }

    #[must_use]
    pub const fn unscheduled(fork: Fork) -> Self {
        Self { fork, block: None }
    }

    #[must_use]
    pub fn is_active(&self, block: u64) -> bool {
        self.block.is_some_and(|activation| activation <= block)
    }
}

/// Violations detected by [`ForkSchedule::check_order`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScheduleDefect {
    /// The same fork is listed twice.
    Duplicate(Fork),
    /// `fork` activates strictly before `previous`, which comes earlier in canonical order.
    Inversion { previous: Fork, previous_block: u64, fork: Fork, block: u64 },
}

/// Fork markers of a single network, kept in canonical [`Fork`] order whatever order they
/// were supplied in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "Vec<ForkActivation>", into = "Vec<ForkActivation>")
)]
pub struct ForkSchedule(Vec<ForkActivation>);

impl ForkSchedule {
    #[must_use]
    pub fn new(mut activations: Vec<ForkActivation>) -> Self {
        // stable, so a duplicated fork keeps both entries for `check_order` to report
        activations.sort_by_key(|entry| entry.fork);
        Self(activations)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ForkActivation> + '_ {
        self.0.iter()
    }

    /// Activation height of `fork`, `None` when the fork is unscheduled or absent.
    #[must_use]
    pub fn activation(&self, fork: Fork) -> Option<u64> {
        self.0.iter().find(|entry| entry.fork == fork).and_then(|entry| entry.block)
    }

    /// Every fork active at `block`, in canonical order.
    #[must_use]
    pub fn active_at(&self, block: u64) -> Vec<Fork> {
        self.0.iter().filter(|entry| entry.is_active(block)).map(|entry| entry.fork).collect()
    }

    /// First scheduled activation strictly above `block`.
    #[must_use]
    pub fn next_fork(&self, block: u64) -> Option<ForkActivation> {
        self.0
            .iter()
            .filter(|entry| entry.block.is_some_and(|activation| activation > block))
            .min_by(|a, b| cmp_activation(a.block, b.block))
            .copied()
    }

    /// Checks that no fork is listed twice and that scheduled heights never decrease along the
    /// canonical fork order. Co-activation at the same height is fine, unscheduled entries are
    /// skipped.
    ///
    /// # Errors
    /// Returns the first defect found.
    pub fn check_order(&self) -> Result<(), ScheduleDefect> {
        let mut seen = ForkSet::default();
        let mut last: Option<(Fork, u64)> = None;
        for entry in &self.0 {
            if seen.contains(entry.fork) {
                return Err(ScheduleDefect::Duplicate(entry.fork));
            }
            seen.insert(entry.fork);

            let Some(block) = entry.block else {
                continue;
            };
            if let Some((previous, previous_block)) = last {
                if block < previous_block {
                    return Err(ScheduleDefect::Inversion {
                        previous,
                        previous_block,
                        fork: entry.fork,
                        block,
                    });
                }
            }
            last = Some((entry.fork, block));
        }
        Ok(())
    }
}

impl FromIterator<ForkActivation> for ForkSchedule {
    fn from_iter<T: IntoIterator<Item = ForkActivation>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<Vec<ForkActivation>> for ForkSchedule {
    fn from(activations: Vec<ForkActivation>) -> Self {
        Self::new(activations)
    }
}

impl From<ForkSchedule> for Vec<ForkActivation> {
    fn from(schedule: ForkSchedule) -> Self {
        schedule.0
    }
}

/// Compact set of fork markers.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ForkSet(u32);

impl ForkSet {
    pub fn insert(&mut self, fork: Fork) {
        self.0 |= fork.bit();
    }

    #[must_use]
    pub const fn contains(self, fork: Fork) -> bool {
        self.0 & fork.bit() != 0
    }

    #[must_use]
    pub const fn is_subset(self, other: Self) -> bool {
        self.0 & other.0 == self.0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Fork> {
        Fork::ALL.into_iter().filter(move |fork| self.contains(*fork))
    }
}

impl FromIterator<Fork> for ForkSet {
    fn from_iter<T: IntoIterator<Item = Fork>>(iter: T) -> Self {
        let mut set = Self::default();
        for fork in iter {
            set.insert(fork);
        }
        set
    }
}

impl fmt::Debug for ForkSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Gas cost table in force.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GasTable {
    Frontier,
    Homestead,
    Eip150,
    Eip158,
    Istanbul,
}

/// Transaction signature validation rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SignatureScheme {
    /// Low-s signatures, no replay protection.
    Homestead,
    /// Low-s signatures, `v` may commit to the chain id.
    Eip155 { chain_id: u64 },
}

/// Protocol behaviours enabled at a given block. Rules are only ever added as the chain
/// advances, never retracted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RuleSet {
    pub chain_id: u64,
    pub forks: ForkSet,
    /// Whether the DAO irregular state change applies. Only true on networks supporting the
    /// DAO fork once its block is reached.
    pub dao_fork: bool,
}

impl RuleSet {
    /// Folds the active forks of `schedule` at `block` into a rule set.
    #[must_use]
    pub fn new(chain_id: u64, schedule: &ForkSchedule, dao_fork_support: bool, block: u64) -> Self {
        let mut forks = ForkSet::default();
        let mut dao_fork = false;
        for fork in schedule.active_at(block) {
            if fork == Fork::DaoFork {
                dao_fork = dao_fork_support;
                if !dao_fork_support {
                    continue;
                }
            }
            forks.insert(fork);
        }
        Self { chain_id, forks, dao_fork }
    }

    #[must_use]
    pub const fn is_active(&self, fork: Fork) -> bool {
        self.forks.contains(fork)
    }

    #[must_use]
    pub const fn is_homestead(&self) -> bool {
        self.is_active(Fork::Homestead)
    }

    #[must_use]
    pub const fn is_eip155(&self) -> bool {
        self.is_active(Fork::Eip155)
    }

    #[must_use]
    pub const fn is_byzantium(&self) -> bool {
        self.is_active(Fork::Byzantium)
    }

    #[must_use]
    pub const fn is_istanbul(&self) -> bool {
        self.is_active(Fork::Istanbul)
    }

    #[must_use]
    pub const fn gas_table(&self) -> GasTable {
        if self.is_active(Fork::Istanbul) {
            GasTable::Istanbul
        } else if self.is_active(Fork::Eip158) {
            GasTable::Eip158
        } else if self.is_active(Fork::Eip150) {
            GasTable::Eip150
        } else if self.is_active(Fork::Homestead) {
            GasTable::Homestead
        } else {
            GasTable::Frontier
        }
    }

    #[must_use]
    pub const fn signature_scheme(&self) -> SignatureScheme {
        if self.is_eip155() {
            SignatureScheme::Eip155 { chain_id: self.chain_id }
        } else {
            SignatureScheme::Homestead
        }
    }
}
