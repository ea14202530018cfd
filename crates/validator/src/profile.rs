//! Validation profiles and the registry
//!
//! A profile groups the validation maps of one or more types. Profiles are
//! registered with a [`ValidatorRegistry`], which configures them once and
//! then dispatches validation by type. A [`ConfigurationPolicy`] decides what
//! counts as a configuration problem.
//!
//! ```
//! use autovalidator::prelude::*;
//!
//! struct Account {
//!     name: String,
//! }
//!
//! #[derive(Default)]
//! struct AccountProfile;
//!
//! impl ValidationProfile for AccountProfile {
//!     fn configure(&self, config: &mut ProfileConfig) -> Result<(), ConfigError> {
//!         config
//!             .create_map::<Account>()
//!             .for_member_check(member!(|m| m.name), check!(|n, exp| exp.not_null_or_empty(n, None)))?;
//!         Ok(())
//!     }
//! }
//!
//! let mut registry = ValidatorRegistry::new();
//! registry.add_profile::<AccountProfile>()?;
//! registry.assert_configuration_is_valid()?;
//!
//! let result = registry.validate(&Account { name: String::new() })?;
//! assert_eq!(result.error("name"), Some("name can't be null or empty"));
//! # Ok::<(), ProfileError>(())
//! ```

use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::fmt;
use std::ops::{Deref, DerefMut};

use indexmap::IndexMap;

use crate::builder::ValidationBuilder;
use crate::error::{ConfigError, ProfileError};
use crate::member::MemberId;
use crate::result::ValidationResult;
use crate::settings::ValidationSettings;

// ============================================================================
// PROFILE
// ============================================================================

/// A named group of validation maps.
pub trait ValidationProfile: Send + Sync + 'static {
    /// Name used in logs and configuration reports.
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed(std::any::type_name::<Self>())
    }

    /// Creates and populates the profile's maps.
    fn configure(&self, config: &mut ProfileConfig) -> Result<(), ConfigError>;
}

/// Type-erased view of a [`ValidationBuilder`].
trait ErasedBuilder: Send + Sync {
    fn members(&self) -> Vec<&MemberId>;
    fn as_any(&self) -> &dyn Any;
}

impl<T: 'static> ErasedBuilder for ValidationBuilder<T> {
    fn members(&self) -> Vec<&MemberId> {
        ValidationBuilder::members(self).collect()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct TypeMap {
    type_id: TypeId,
    type_name: &'static str,
    builder: Box<dyn ErasedBuilder>,
}

/// Collects the maps a profile creates.
#[derive(Default)]
pub struct ProfileConfig {
    maps: Vec<TypeMap>,
}

impl ProfileConfig {
    /// Starts a new map for `T`. Each call creates a separate map, which
    /// joins the profile once the returned [`MapBuilder`] is dropped.
    pub fn create_map<T: 'static>(&mut self) -> MapBuilder<'_, T> {
        MapBuilder {
            config: self,
            builder: ValidationBuilder::new(),
        }
    }

    /// Number of maps created so far.
    pub fn map_count(&self) -> usize {
        self.maps.len()
    }
}

/// A map under construction, handed out by [`ProfileConfig::create_map`].
///
/// Derefs to the [`ValidationBuilder`] for `T`; the map is stored in the
/// profile when this handle goes out of scope.
pub struct MapBuilder<'a, T: 'static> {
    config: &'a mut ProfileConfig,
    builder: ValidationBuilder<T>,
}

impl<T: 'static> Deref for MapBuilder<'_, T> {
    type Target = ValidationBuilder<T>;

    fn deref(&self) -> &Self::Target {
        &self.builder
    }
}

impl<T: 'static> DerefMut for MapBuilder<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.builder
    }
}

impl<T: 'static> Drop for MapBuilder<'_, T> {
    fn drop(&mut self) {
        self.config.maps.push(TypeMap {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            builder: Box::new(std::mem::take(&mut self.builder)),
        });
    }
}

impl<T: 'static> fmt::Debug for MapBuilder<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MapBuilder").field(&self.builder).finish()
    }
}

impl fmt::Debug for ProfileConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.maps.iter().map(|map| map.type_name))
            .finish()
    }
}

// ============================================================================
// CONFIGURATION POLICY
// ============================================================================

/// What one map looks like, as seen by a [`ConfigurationPolicy`].
#[derive(Debug, Clone)]
pub struct MapSummary<'a> {
    /// Profile that created the map.
    pub profile: &'a str,
    /// Mapped type.
    pub type_id: TypeId,
    /// Mapped type name.
    pub type_name: &'static str,
    /// Constrained members, once per constraint, in registration order.
    pub members: Vec<&'a MemberId>,
}

/// A problem found in the registered configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigurationIssue {
    /// One map constrains a member more than once.
    DuplicateMember {
        /// Profile that created the map.
        profile: String,
        /// Mapped type name.
        type_name: &'static str,
        /// Member name.
        member: String,
        /// Number of constraints on the member.
        count: usize,
    },
    /// Several profiles map the same type.
    DuplicateTypeMap {
        /// Mapped type name.
        type_name: &'static str,
        /// Profiles mapping the type, in registration order.
        profiles: Vec<String>,
    },
}

impl ConfigurationIssue {
    /// Whether the issue concerns `profile`.
    pub fn involves(&self, profile: &str) -> bool {
        match self {
            Self::DuplicateMember { profile: owner, .. } => owner == profile,
            Self::DuplicateTypeMap { profiles, .. } => profiles.iter().any(|p| p == profile),
        }
    }
}

impl fmt::Display for ConfigurationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateMember {
                profile,
                type_name,
                member,
                count,
            } => write!(
                f,
                "profile `{profile}` constrains `{type_name}::{member}` {count} times"
            ),
            Self::DuplicateTypeMap {
                type_name,
                profiles,
            } => write!(
                f,
                "type `{type_name}` is mapped by several profiles: {}",
                profiles.join(", ")
            ),
        }
    }
}

/// Reviews the registered maps for configuration problems.
pub trait ConfigurationPolicy: Send + Sync {
    /// Returns every issue found; empty when the configuration is valid.
    fn review(&self, maps: &[MapSummary<'_>]) -> Vec<ConfigurationIssue>;
}

/// Accepts every configuration. Duplicate constraints on a member are
/// allowed and the last failing one wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissivePolicy;

impl ConfigurationPolicy for PermissivePolicy {
    fn review(&self, _maps: &[MapSummary<'_>]) -> Vec<ConfigurationIssue> {
        Vec::new()
    }
}

/// Flags members constrained more than once within a map, and types mapped
/// by more than one profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicateMemberPolicy;

impl ConfigurationPolicy for DuplicateMemberPolicy {
    fn review(&self, maps: &[MapSummary<'_>]) -> Vec<ConfigurationIssue> {
        let mut issues = Vec::new();

        for map in maps {
            let mut counts: IndexMap<&str, usize> = IndexMap::new();
            for member in &map.members {
                *counts.entry(member.name()).or_default() += 1;
            }
            issues.extend(counts.into_iter().filter(|(_, count)| *count > 1).map(
                |(member, count)| ConfigurationIssue::DuplicateMember {
                    profile: map.profile.to_string(),
                    type_name: map.type_name,
                    member: member.to_string(),
                    count,
                },
            ));
        }

        let mut owners: IndexMap<TypeId, (&'static str, Vec<&str>)> = IndexMap::new();
        for map in maps {
            let (_, profiles) = owners
                .entry(map.type_id)
                .or_insert_with(|| (map.type_name, Vec::new()));
            if !profiles.contains(&map.profile) {
                profiles.push(map.profile);
            }
        }
        issues.extend(
            owners
                .into_values()
                .filter(|(_, profiles)| profiles.len() > 1)
                .map(|(type_name, profiles)| ConfigurationIssue::DuplicateTypeMap {
                    type_name,
                    profiles: profiles.into_iter().map(str::to_string).collect(),
                }),
        );

        issues
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Configuration report for one profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileValidationResult {
    /// Profile name.
    pub profile: String,
    /// Number of maps the profile created.
    pub map_count: usize,
    /// Issues involving the profile.
    pub issues: Vec<ConfigurationIssue>,
}

impl ProfileValidationResult {
    /// Whether no issue involves the profile.
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

struct RegisteredProfile {
    name: Cow<'static, str>,
    maps: Vec<TypeMap>,
}

/// Registered profiles plus the policy that reviews them.
pub struct ValidatorRegistry {
    profiles: Vec<RegisteredProfile>,
    policy: Box<dyn ConfigurationPolicy>,
}

impl ValidatorRegistry {
    /// Empty registry with the [`PermissivePolicy`].
    pub fn new() -> Self {
        Self::with_policy(PermissivePolicy)
    }

    /// Empty registry reviewed by `policy`.
    pub fn with_policy(policy: impl ConfigurationPolicy + 'static) -> Self {
        Self {
            profiles: Vec::new(),
            policy: Box::new(policy),
        }
    }

    /// Registers a profile by type.
    pub fn add_profile<P: ValidationProfile + Default>(&mut self) -> Result<&mut Self, ProfileError> {
        self.add_profile_instance(P::default())
    }

    /// Registers a profile value, configuring it right away.
    pub fn add_profile_instance(
        &mut self,
        profile: impl ValidationProfile,
    ) -> Result<&mut Self, ProfileError> {
        self.register(&profile)?;
        Ok(self)
    }

    /// Registers every profile in `profiles`, stopping at the first failure.
    pub fn add_profiles<I>(&mut self, profiles: I) -> Result<&mut Self, ProfileError>
    where
        I: IntoIterator<Item = Box<dyn ValidationProfile>>,
    {
        for profile in profiles {
            self.register(profile.as_ref())?;
        }
        Ok(self)
    }

    fn register(&mut self, profile: &dyn ValidationProfile) -> Result<(), ProfileError> {
        let name = profile.name();
        let mut config = ProfileConfig::default();
        profile.configure(&mut config)?;

        tracing::debug!(
            profile = %name,
            maps = config.maps.len(),
            "registered validation profile"
        );

        self.profiles.push(RegisteredProfile {
            name,
            maps: config.maps,
        });
        Ok(())
    }

    /// Number of registered profiles.
    pub fn profile_count(&self) -> usize {
        self.profiles.len()
    }

    fn summaries(&self) -> Vec<MapSummary<'_>> {
        self.profiles
            .iter()
            .flat_map(|profile| {
                profile.maps.iter().map(|map| MapSummary {
                    profile: &profile.name,
                    type_id: map.type_id,
                    type_name: map.type_name,
                    members: map.builder.members(),
                })
            })
            .collect()
    }

    /// Per-profile configuration report.
    pub fn configuration_validation(&self) -> Vec<ProfileValidationResult> {
        let issues = self.policy.review(&self.summaries());
        self.profiles
            .iter()
            .map(|profile| ProfileValidationResult {
                profile: profile.name.to_string(),
                map_count: profile.maps.len(),
                issues: issues
                    .iter()
                    .filter(|issue| issue.involves(&profile.name))
                    .cloned()
                    .collect(),
            })
            .collect()
    }

    /// Fails when the policy reports any issue.
    pub fn assert_configuration_is_valid(&self) -> Result<(), ProfileError> {
        let issues = self.policy.review(&self.summaries());
        if issues.is_empty() {
            return Ok(());
        }

        for issue in &issues {
            tracing::warn!(issue = %issue, "validation configuration issue");
        }
        Err(ProfileError::InvalidConfiguration {
            issues: issues.iter().map(ToString::to_string).collect(),
        })
    }

    /// Validates `instance` against every map of `T`, with default settings.
    pub fn validate<T: 'static>(&self, instance: &T) -> Result<ValidationResult, ProfileError> {
        self.validate_with(instance, &ValidationSettings::default())
    }

    /// Validates `instance` against every map of `T`, merging the results in
    /// registration order.
    pub fn validate_with<T: 'static>(
        &self,
        instance: &T,
        settings: &ValidationSettings,
    ) -> Result<ValidationResult, ProfileError> {
        let type_id = TypeId::of::<T>();
        let mut builders = self
            .profiles
            .iter()
            .flat_map(|profile| &profile.maps)
            .filter(|map| map.type_id == type_id)
            .filter_map(|map| map.builder.as_any().downcast_ref::<ValidationBuilder<T>>());

        let first = builders.next().ok_or(ProfileError::NotRegistered {
            type_name: std::any::type_name::<T>(),
        })?;
        let mut result = first.validate_with(instance, settings);
        for builder in builders {
            result.merge(builder.validate_with(instance, settings));
        }
        Ok(result)
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field(
                "profiles",
                &self.profiles.iter().map(|p| &p.name).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}
