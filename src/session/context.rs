//! Explicit session context
//!
//! Everything an operation needs from "the current session" is passed in
//! through [`IshSession`]: the configuration, batch planners built from it,
//! and the type field setup shared read-only between callers.

use std::sync::Arc;
use tracing::info;

use super::config::{ConfigError, SessionConfig};
use crate::batch::BatchPlanner;
use crate::models::{ActionMode, IshFields, IshTypeFieldSetup, legacy_definitions};

/// Session context handed to every field operation
#[derive(Debug, Clone)]
pub struct IshSession {
    config: SessionConfig,
    type_field_setup: Arc<IshTypeFieldSetup>,
    metadata_planner: BatchPlanner,
    blob_planner: BatchPlanner,
}

impl IshSession {
    /// Create a session; the setup takes the configured strict preference
    pub fn new(config: SessionConfig, setup: IshTypeFieldSetup) -> Result<Self, ConfigError> {
        config.validate()?;
        let metadata_planner = planner(config.metadata_batch_size, "metadataBatchSize")?;
        let blob_planner = planner(config.blob_batch_size, "blobBatchSize")?;
        let setup = setup.with_strict_metadata_preference(config.strict_metadata_preference);

        info!(
            "Session ready: {} field definitions, metadata batch size {}",
            setup.len(),
            config.metadata_batch_size
        );

        Ok(Self {
            config,
            type_field_setup: Arc::new(setup),
            metadata_planner,
            blob_planner,
        })
    }

    /// Create a session backed by the static legacy field table
    pub fn with_legacy_setup(config: SessionConfig) -> Result<Self, ConfigError> {
        Self::new(config, IshTypeFieldSetup::new(legacy_definitions()))
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn type_field_setup(&self) -> &IshTypeFieldSetup {
        &self.type_field_setup
    }

    /// Handle to the setup for use on other threads
    pub fn shared_type_field_setup(&self) -> Arc<IshTypeFieldSetup> {
        Arc::clone(&self.type_field_setup)
    }

    pub fn metadata_planner(&self) -> BatchPlanner {
        self.metadata_planner
    }

    pub fn blob_planner(&self) -> BatchPlanner {
        self.blob_planner
    }

    /// Default requested fields of `entity_types` for the configured group
    pub fn default_requested_fields(&self, entity_types: &[&str]) -> IshFields {
        self.type_field_setup
            .default_requested_fields(entity_types, self.config.default_requested_metadata)
    }

    /// `current` plus the session defaults, as the schema allows for `mode`
    pub fn requested_metadata_fields(
        &self,
        entity_types: &[&str],
        current: &IshFields,
        mode: ActionMode,
    ) -> IshFields {
        let defaults = self.default_requested_fields(entity_types);
        self.type_field_setup
            .to_ish_requested_metadata_fields(&defaults, entity_types, current, mode)
    }

    /// Write payload with disallowed fields removed
    pub fn metadata_fields(
        &self,
        entity_types: &[&str],
        current: &IshFields,
        mode: ActionMode,
    ) -> IshFields {
        self.type_field_setup
            .to_ish_metadata_fields(entity_types, current, mode)
    }

    /// Search filter with unsearchable fields removed
    pub fn filter_fields(&self, entity_types: &[&str], current: &IshFields) -> IshFields {
        self.type_field_setup
            .to_ish_metadata_filter_fields(entity_types, current)
    }
}

fn planner(size: usize, setting: &'static str) -> Result<BatchPlanner, ConfigError> {
    BatchPlanner::new(size).map_err(|_| ConfigError::InvalidBatchSize {
        setting,
        value: size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IshField, Level, StrictMetadataPreference, ValueType};

    #[test]
    fn test_session_applies_strict_preference() {
        let config = SessionConfig::builder()
            .strict_metadata_preference(StrictMetadataPreference::Off)
            .build()
            .unwrap();
        let session = IshSession::with_legacy_setup(config).unwrap();
        assert_eq!(
            session.type_field_setup().strict_metadata_preference(),
            StrictMetadataPreference::Off
        );
    }

    #[test]
    fn test_requested_metadata_for_users() {
        let session = IshSession::with_legacy_setup(SessionConfig::default()).unwrap();
        let requested =
            session.requested_metadata_fields(&["ISHUser"], &IshFields::new(), ActionMode::Read);

        assert!(requested.contains("FISHUSERDISPLAYNAME", Level::None, ValueType::Value));
        assert!(requested.contains("FISHUSERTYPE", Level::None, ValueType::Element));
        assert!(!requested.contains("FISHPASSWORD", Level::None, ValueType::All));
    }

    #[test]
    fn test_metadata_strips_system_fields_on_update() {
        let session = IshSession::with_legacy_setup(SessionConfig::default()).unwrap();
        let mut current = IshFields::new();
        current
            .add_field(IshField::metadata(
                "FISHEMAIL",
                Level::None,
                ValueType::Value,
                Some("a@b.c"),
            ))
            .add_field(IshField::metadata(
                "FISHLASTLOGINON",
                Level::None,
                ValueType::Value,
                Some("now"),
            ));

        let update = session.metadata_fields(&["ISHUser"], &current, ActionMode::Update);
        assert_eq!(update.len(), 1);
        assert_eq!(update.fields()[0].name(), "FISHEMAIL");
    }

    #[test]
    fn test_setup_is_shared() {
        let session = IshSession::with_legacy_setup(SessionConfig::default()).unwrap();
        let shared = session.shared_type_field_setup();
        let handle = std::thread::spawn(move || shared.has_entity_type("ISHUser"));
        assert!(handle.join().unwrap());
    }
}
