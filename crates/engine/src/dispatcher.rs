// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Service dispatcher
//!
//! Resolves targets against the registry and runs per-pool operations
//! concurrently. One pool failing never stops the others.

use crate::error::DispatchError;
use crate::registry::PoolRegistry;
use crate::sensor::{MediaSelection, PoolSensor};
use crate::service::{
    FanoutReport, LineValue, MediaValue, PlayValue, Service, ServiceData, ServiceResponse,
};
use pools_adapters::{NotifyAdapter, StateAdapter};
use pools_core::{Clock, EntityState, NotifyConfig, PoolKind};
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::task::JoinSet;

#[derive(Debug, Clone, Copy)]
enum FanoutOp {
    Shuffle,
    Reload,
    Reset,
}

pub struct Dispatcher<S, N, C> {
    registry: Arc<PoolRegistry<S, C>>,
    notify: N,
    notify_config: NotifyConfig,
}

impl<S, N, C> Dispatcher<S, N, C>
where
    S: StateAdapter,
    N: NotifyAdapter,
    C: Clock,
{
    pub fn new(registry: Arc<PoolRegistry<S, C>>, notify: N, notify_config: NotifyConfig) -> Self {
        Self {
            registry,
            notify,
            notify_config,
        }
    }

    pub fn registry(&self) -> &Arc<PoolRegistry<S, C>> {
        &self.registry
    }

    /// Dispatch a call by service name
    pub async fn call_by_name(&self, name: &str, data: ServiceData) -> ServiceResponse {
        match name.parse::<Service>() {
            Ok(service) => self.call(service, data).await,
            Err(e) => e.into(),
        }
    }

    pub async fn call(&self, service: Service, data: ServiceData) -> ServiceResponse {
        tracing::info!(%service, targets = ?data.target_ids(), all = ?data.all, "service call");
        match service {
            Service::Shuffle => self.fanout(service, &data, FanoutOp::Shuffle).await.into(),
            Service::Reload => self.fanout(service, &data, FanoutOp::Reload).await.into(),
            Service::ResetStats => self.fanout(service, &data, FanoutOp::Reset).await.into(),
            Service::ShuffleAll => {
                let data = ServiceData {
                    all: Some(true),
                    ..data
                };
                self.fanout(service, &data, FanoutOp::Shuffle).await.into()
            }
            Service::ReloadAll => {
                let data = ServiceData {
                    all: Some(true),
                    ..data
                };
                self.fanout(service, &data, FanoutOp::Reload).await.into()
            }
            Service::GetLine => match self.get_line(&data).await {
                Ok(value) => ServiceResponse::Line(value),
                Err(e) => e.into(),
            },
            Service::GetMedia => match self.get_media(&data).await {
                Ok(value) => ServiceResponse::Media(value),
                Err(e) => e.into(),
            },
            Service::Play => match self.play(&data).await {
                Ok(value) => ServiceResponse::Play(value),
                Err(e) => e.into(),
            },
        }
    }

    async fn fanout(&self, service: Service, data: &ServiceData, op: FanoutOp) -> FanoutReport {
        let mut report = FanoutReport {
            ok: true,
            service: service.to_string(),
            ..FanoutReport::default()
        };

        let targets = if data.targets_all() {
            self.registry.all()
        } else {
            let mut found = Vec::new();
            for id in data.target_ids() {
                match self.registry.get(&id) {
                    Some(sensor) => found.push(sensor),
                    None => {
                        tracing::warn!(entity_id = %id, %service, "unknown entity, skipping");
                        report.unknown.push(id);
                    }
                }
            }
            found
        };

        let mut tasks = JoinSet::new();
        let mut outstanding = BTreeSet::new();
        for sensor in targets {
            if !outstanding.insert(sensor.entity_id().to_string()) {
                continue;
            }
            tasks.spawn(async move {
                let result = match op {
                    FanoutOp::Shuffle => sensor.shuffle().await,
                    FanoutOp::Reload => sensor.reload().await,
                    FanoutOp::Reset => sensor.reset().await,
                };
                (sensor.entity_id().to_string(), result.is_ok())
            });
        }

        while let Some(result) = tasks.join_next().await {
            match result {
                Ok((entity_id, true)) => {
                    outstanding.remove(&entity_id);
                    report.applied.push(entity_id);
                }
                Ok((entity_id, false)) => {
                    tracing::warn!(%entity_id, %service, "pool operation failed");
                }
                Err(e) => tracing::error!(%service, error = %e, "pool task failed"),
            }
        }
        report.applied.sort();
        // Whatever did not report success failed
        report.failed = outstanding.into_iter().collect();
        report.ok = report.failed.is_empty();
        report
    }

    /// Resolve the single target of a data-returning call and check its kind
    fn resolve(
        &self,
        data: &ServiceData,
        expected: PoolKind,
    ) -> Result<Arc<PoolSensor<S, C>>, DispatchError> {
        let entity_id = data.single_target()?;
        let sensor = self
            .registry
            .get(&entity_id)
            .ok_or_else(|| DispatchError::NotFound(entity_id.clone()))?;
        if sensor.kind() != expected {
            return Err(DispatchError::KindMismatch {
                entity_id,
                expected,
            });
        }
        Ok(sensor)
    }

    async fn current_or_shuffled(
        sensor: &PoolSensor<S, C>,
        data: &ServiceData,
    ) -> EntityState {
        if data.shuffle_first() {
            // A rejected publish still leaves the new pick in the snapshot
            sensor.shuffle().await.unwrap_or_else(|_| sensor.snapshot())
        } else {
            sensor.snapshot()
        }
    }

    pub async fn get_line(&self, data: &ServiceData) -> Result<LineValue, DispatchError> {
        let sensor = self.resolve(data, PoolKind::Lines)?;
        let state = Self::current_or_shuffled(&sensor, data).await;
        Ok(LineValue {
            ok: true,
            entity_id: state.entity_id,
            value: state.value,
            attributes: state.attributes,
        })
    }

    pub async fn get_media(&self, data: &ServiceData) -> Result<MediaValue, DispatchError> {
        let sensor = self.resolve(data, PoolKind::Media)?;
        let (media, _) = Self::media_value(&sensor, data).await;
        Ok(media)
    }

    async fn media_value(
        sensor: &PoolSensor<S, C>,
        data: &ServiceData,
    ) -> (MediaValue, MediaSelection) {
        let state = Self::current_or_shuffled(sensor, data).await;
        let selection = sensor.media_selection().await.unwrap_or_default();
        let media = MediaValue {
            ok: true,
            entity_id: state.entity_id,
            filename: state.value,
            relative_url: selection.relative_url.clone().unwrap_or_default(),
            absolute_path: selection.absolute_path.clone().unwrap_or_default(),
            attributes: state.attributes,
        };
        (media, selection)
    }

    /// Optionally shuffle, then hand the media pool's pick to the notify
    /// channel
    pub async fn play(&self, data: &ServiceData) -> Result<PlayValue, DispatchError> {
        let sensor = self.resolve(data, PoolKind::Media)?;
        let (media, selection) = Self::media_value(&sensor, data).await;
        let played = selection
            .playable
            .ok_or_else(|| DispatchError::NothingToPlay(media.entity_id.clone()))?;

        let channel = self
            .notify_config
            .channel_or_default(data.channel.as_deref())
            .to_string();
        self.notify.send(&channel, &played).await?;

        Ok(PlayValue {
            media,
            channel,
            played,
        })
    }
}

impl From<FanoutReport> for ServiceResponse {
    fn from(report: FanoutReport) -> Self {
        ServiceResponse::Fanout(report)
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
