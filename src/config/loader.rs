use crate::{
    capabilities::model::CapabilityStore,
    config::{
        derive::{AnimationRangeDeriver, AnimationSetup},
        model::AnimationConfig,
    },
    foundation::{core::Instant, error::TimestepResult},
    timeline::constraints::AnimationConstraints,
};

/// Owns a validated configuration, the capabilities it was derived against, and the
/// current [`AnimationSetup`].
///
/// Fetching capabilities is left to the caller: list the urls with
/// [`ConfigLoader::capability_urls`], fetch and parse them, then hand the store to
/// [`ConfigLoader::init`]. Periodic refreshes go through [`ConfigLoader::reload`].
#[derive(Clone, Debug)]
pub struct ConfigLoader {
    config: AnimationConfig,
    capabilities: CapabilityStore,
    setup: Option<AnimationSetup>,
}

impl ConfigLoader {
    pub fn new(config: AnimationConfig) -> TimestepResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            capabilities: CapabilityStore::default(),
            setup: None,
        })
    }

    /// Distinct capability urls referenced by the layers, in first-seen order.
    pub fn capability_urls(&self) -> Vec<&str> {
        let mut urls: Vec<&str> = Vec::new();
        for caps in self.config.layers.iter().filter_map(|l| l.capabilities.as_ref()) {
            if !urls.contains(&caps.url.as_str()) {
                urls.push(&caps.url);
            }
        }
        urls
    }

    #[tracing::instrument(skip(self, capabilities))]
    pub fn init(
        &mut self,
        capabilities: CapabilityStore,
        now: Instant,
    ) -> TimestepResult<&AnimationSetup> {
        self.apply(capabilities, now)
    }

    /// Re-derive against refreshed capabilities. On error the previous setup is kept.
    #[tracing::instrument(skip(self, capabilities))]
    pub fn reload(
        &mut self,
        capabilities: CapabilityStore,
        now: Instant,
    ) -> TimestepResult<&AnimationSetup> {
        if self.setup.is_none() {
            tracing::debug!("reload before init");
        }
        self.apply(capabilities, now)
    }

    /// [`ConfigLoader::init`] at the current wall-clock time.
    pub fn init_now(&mut self, capabilities: CapabilityStore) -> TimestepResult<&AnimationSetup> {
        self.init(capabilities, Instant::now())
    }

    fn apply(
        &mut self,
        capabilities: CapabilityStore,
        now: Instant,
    ) -> TimestepResult<&AnimationSetup> {
        let setup = AnimationRangeDeriver::new(&self.config, &capabilities).derive(now)?;
        self.capabilities = capabilities;
        Ok(self.setup.insert(setup))
    }

    pub fn setup(&self) -> Option<&AnimationSetup> {
        self.setup.as_ref()
    }

    /// Per-layer timelines and range groups of the current setup.
    pub fn constraints(&self) -> Option<AnimationConstraints> {
        self.setup.as_ref().map(AnimationConstraints::from_setup)
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn capabilities(&self) -> &CapabilityStore {
        &self.capabilities
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/loader.rs"]
mod tests;
