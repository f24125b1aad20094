//! Pipeline exclusivity guard.
//!
//! A single atomic cell holds the [`PipelineStatus`]. Entering a stage is a
//! compare-and-swap from `Idle`; the returned guard puts the cell back to
//! `Idle` when dropped, whichever way the stage exits.

use std::sync::atomic::{AtomicU8, Ordering};

use tracing::debug;

use lumina_models::PipelineStatus;

use crate::error::{StudioError, StudioResult};

/// Shared pipeline status.
#[derive(Debug, Default)]
pub struct StatusCell {
    value: AtomicU8,
}

impl StatusCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> PipelineStatus {
        PipelineStatus::from_u8(self.value.load(Ordering::Acquire)).unwrap_or_default()
    }

    /// Admit `stage` if nothing else is running.
    ///
    /// Rejects with [`StudioError::Busy`] naming the running stage otherwise.
    pub fn enter(&self, stage: PipelineStatus) -> StudioResult<PipelineGuard<'_>> {
        if stage.is_idle() {
            return Err(StudioError::validation("Idle is not a pipeline stage"));
        }

        match self.value.compare_exchange(
            PipelineStatus::Idle.as_u8(),
            stage.as_u8(),
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => {
                debug!(stage = %stage, "Pipeline stage admitted");
                Ok(PipelineGuard { cell: self, stage })
            }
            Err(running) => Err(StudioError::busy(
                stage,
                PipelineStatus::from_u8(running).unwrap_or_default(),
            )),
        }
    }
}

/// RAII guard for an admitted pipeline stage.
#[derive(Debug)]
pub struct PipelineGuard<'a> {
    cell: &'a StatusCell,
    stage: PipelineStatus,
}

impl PipelineGuard<'_> {
    pub fn stage(&self) -> PipelineStatus {
        self.stage
    }
}

impl Drop for PipelineGuard<'_> {
    fn drop(&mut self) {
        self.cell
            .value
            .store(PipelineStatus::Idle.as_u8(), Ordering::Release);
        debug!(stage = %self.stage, "Pipeline stage released");
    }
}
