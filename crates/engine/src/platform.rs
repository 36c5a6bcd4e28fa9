// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Platform: builds every pool from configuration, registers the sensors,
//! and owns them for the life of the process

use crate::discover::{plan_lines, plan_media, PoolPlan};
use crate::dispatcher::Dispatcher;
use crate::registry::PoolRegistry;
use crate::sensor::PoolSensor;
use pools_adapters::{NotifyAdapter, StateAdapter};
use pools_core::paths::resolve_path;
use pools_core::{
    Clock, ConfigError, EntityState, LineLimits, LinePool, MediaPool, NotifyConfig,
    PlatformConfig, Pool,
};
use std::sync::Arc;
use tokio::task::JoinSet;

/// Adapter dependencies for a platform
pub struct PlatformDeps<S, N, C> {
    pub state: S,
    pub notify: N,
    pub clock: C,
}

pub struct Platform<S, N, C> {
    sensors: Vec<Arc<PoolSensor<S, C>>>,
    registry: Arc<PoolRegistry<S, C>>,
    dispatcher: Dispatcher<S, N, C>,
}

impl<S, N, C> Platform<S, N, C>
where
    S: StateAdapter,
    N: NotifyAdapter,
    C: Clock,
{
    /// Build and register every pool, then attach them all.
    ///
    /// Fails only on invalid configuration; missing directories yield a
    /// platform with fewer (or no) pools.
    pub async fn setup(
        config: &PlatformConfig,
        notify_config: NotifyConfig,
        deps: PlatformDeps<S, N, C>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let lines_filter = config.lines_filter()?;
        let media_filter = config.media_filter()?;

        let registry = Arc::new(PoolRegistry::new());
        let mut sensors = Vec::new();

        let lines_root = config.resolve(&config.lines_directory);
        let limits = LineLimits {
            max_lines: config.max_lines,
            max_chars: config.max_chars,
        };
        for plan in plan_lines(config, &lines_filter).await {
            let pool = LinePool::new(
                resolve_path(&lines_root, &plan.source),
                limits,
                config.selection_mode,
                config.no_repeat,
                config.fallback_text.clone(),
            );
            Self::add(&registry, &mut sensors, plan, pool.into(), &deps);
        }

        let media_root = config.resolve(&config.media_directory);
        for plan in plan_media(config, &media_filter).await {
            let pool = MediaPool::new(
                resolve_path(&media_root, &plan.source),
                config.media_directory.clone(),
                plan.source.clone(),
                media_filter.clone(),
                config.serve_from,
            )
            .with_selection(config.selection_mode, config.no_repeat)
            .with_fallback_url(config.fallback_url.clone());
            Self::add(&registry, &mut sensors, plan, pool.into(), &deps);
        }

        let dispatcher = Dispatcher::new(Arc::clone(&registry), deps.notify, notify_config);
        let platform = Self {
            sensors,
            registry,
            dispatcher,
        };
        platform.attach_all().await;
        tracing::info!(pools = platform.sensors.len(), "platform ready");
        Ok(platform)
    }

    fn add(
        registry: &PoolRegistry<S, C>,
        sensors: &mut Vec<Arc<PoolSensor<S, C>>>,
        plan: PoolPlan,
        pool: Pool,
        deps: &PlatformDeps<S, N, C>,
    ) {
        let sensor = Arc::new(PoolSensor::new(
            plan.descriptor,
            pool,
            deps.state.clone(),
            deps.clock.clone(),
        ));
        if registry.register(&sensor) {
            sensors.push(sensor);
        } else {
            tracing::warn!(entity_id = sensor.entity_id(), "duplicate entity id, skipping");
        }
    }

    /// Force-reload and publish every sensor concurrently
    pub async fn attach_all(&self) -> usize {
        let mut tasks = JoinSet::new();
        for sensor in &self.sensors {
            let sensor = Arc::clone(sensor);
            tasks.spawn(async move { sensor.attach().await });
        }

        let mut attached = 0;
        while let Some(result) = tasks.join_next().await {
            match result {
                Ok(Ok(_)) => attached += 1,
                Ok(Err(e)) => tracing::warn!(error = %e, "initial publish failed"),
                Err(e) => tracing::error!(error = %e, "attach failed"),
            }
        }
        attached
    }

    pub fn dispatcher(&self) -> &Dispatcher<S, N, C> {
        &self.dispatcher
    }

    pub fn registry(&self) -> &Arc<PoolRegistry<S, C>> {
        &self.registry
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }

    /// Last published state of one entity
    pub fn state(&self, entity_id: &str) -> Option<EntityState> {
        self.registry.get(entity_id).map(|s| s.snapshot())
    }

    /// Last published state of every entity, ordered by id
    pub fn entities(&self) -> Vec<EntityState> {
        self.registry.all().iter().map(|s| s.snapshot()).collect()
    }

    /// Unregister and withdraw every sensor
    pub async fn teardown(&mut self) {
        for sensor in self.sensors.drain(..) {
            self.registry.unregister(sensor.entity_id());
            sensor.detach().await;
        }
        self.registry.clear();
        tracing::info!("platform torn down");
    }
}

#[cfg(test)]
#[path = "platform_tests.rs"]
mod tests;
