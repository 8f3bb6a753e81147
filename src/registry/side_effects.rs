//! Creation side effects
//!
//! A freshly constructed level becomes visible through a fixed sequence of
//! steps. Each step records how to revert itself; when a step fails or
//! panics, the steps that already ran are reverted newest first, leaving the
//! host as it was before the chain started.
//!
//! The level is marked published before its load event is posted, so event
//! subscribers always find it through the registry.

use crate::error::DimensionError;
use crate::events::LevelEvent;
use crate::host::ServerAccess;
use crate::thread_pool::panic_message;
use crate::world::level::border::BorderListenerId;
use crate::world::level::{DelegateBorderListener, ServerLevel};
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// One named creation side effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CreationStep {
    /// Copy the overworld border onto the new level and forward later changes
    LinkBorder,
    /// Insert into the level table
    Publish,
    /// Invalidate the host's cached level enumeration
    MarkWorldsDirty,
    /// Mark the level published, then post the load event
    FireLoadEvent,
}

/// Order in which a new level's side effects run
pub const CREATION_ORDER: [CreationStep; 4] = [
    CreationStep::LinkBorder,
    CreationStep::Publish,
    CreationStep::MarkWorldsDirty,
    CreationStep::FireLoadEvent,
];

impl CreationStep {
    pub fn name(&self) -> &'static str {
        match self {
            CreationStep::LinkBorder => "link_border",
            CreationStep::Publish => "publish",
            CreationStep::MarkWorldsDirty => "mark_worlds_dirty",
            CreationStep::FireLoadEvent => "fire_load_event",
        }
    }
}

impl fmt::Display for CreationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which steps ran, and which were reverted afterwards
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainReport {
    pub completed: Vec<CreationStep>,
    pub undone: Vec<CreationStep>,
}

impl ChainReport {
    pub fn is_complete(&self) -> bool {
        self.undone.is_empty() && self.completed.as_slice() == CREATION_ORDER
    }
}

/// A step failed or panicked; everything before it has been reverted
#[derive(Debug)]
pub struct ChainFailure {
    pub step: CreationStep,
    pub error: DimensionError,
    pub report: ChainReport,
}

/// What it takes to revert one completed step
enum UndoRecord {
    Unlink(BorderListenerId),
    Unpublish,
    Nothing,
}

/// Runs `CREATION_ORDER` for one level
pub(crate) struct SideEffectChain<'a> {
    server: &'a dyn ServerAccess,
    overworld: &'a Arc<ServerLevel>,
    level: &'a Arc<ServerLevel>,
}

impl<'a> SideEffectChain<'a> {
    pub(crate) fn new(
        server: &'a dyn ServerAccess,
        overworld: &'a Arc<ServerLevel>,
        level: &'a Arc<ServerLevel>,
    ) -> Self {
        Self {
            server,
            overworld,
            level,
        }
    }

    pub(crate) fn run(self) -> Result<ChainReport, ChainFailure> {
        let mut report = ChainReport::default();
        let mut records: Vec<(CreationStep, UndoRecord)> = Vec::with_capacity(CREATION_ORDER.len());

        for step in CREATION_ORDER {
            let outcome = catch_unwind(AssertUnwindSafe(|| self.execute(step)))
                .unwrap_or_else(|payload| {
                    Err(DimensionError::SideEffect {
                        key: self.level.key().to_string(),
                        step: step.to_string(),
                        error: panic_message(&*payload),
                    })
                });
            match outcome {
                Ok(record) => {
                    log::trace!(
                        "[SideEffectChain::run] {} completed for {}",
                        step,
                        self.level.key()
                    );
                    report.completed.push(step);
                    records.push((step, record));
                }
                Err(error) => {
                    while let Some((done, record)) = records.pop() {
                        self.undo(record);
                        report.undone.push(done);
                    }
                    return Err(ChainFailure {
                        step,
                        error,
                        report,
                    });
                }
            }
        }

        Ok(report)
    }

    fn execute(&self, step: CreationStep) -> Result<UndoRecord, DimensionError> {
        match step {
            CreationStep::LinkBorder => {
                let source = self.overworld.world_border();
                let target = self.level.world_border();
                target.copy_from(source.settings());
                let id = source.add_listener(Box::new(DelegateBorderListener::new(
                    Arc::downgrade(target),
                )));
                Ok(UndoRecord::Unlink(id))
            }
            CreationStep::Publish => {
                self.server.levels().insert_new(Arc::clone(self.level))?;
                Ok(UndoRecord::Unpublish)
            }
            CreationStep::MarkWorldsDirty => {
                self.server.mark_worlds_dirty();
                Ok(UndoRecord::Nothing)
            }
            CreationStep::FireLoadEvent => {
                self.level.mark_published();
                let delivered = self
                    .server
                    .event_bus()
                    .post(LevelEvent::load(Arc::clone(self.level)));
                log::trace!(
                    "[SideEffectChain::execute] Load event for {} delivered to {} subscribers",
                    self.level.key(),
                    delivered
                );
                Ok(UndoRecord::Nothing)
            }
        }
    }

    fn undo(&self, record: UndoRecord) {
        match record {
            UndoRecord::Unlink(id) => {
                self.overworld.world_border().remove_listener(id);
            }
            UndoRecord::Unpublish => {
                self.server.levels().remove(self.level.key());
                self.level.mark_constructed();
                // a rebuilt enumeration may already hold the level
                self.server.mark_worlds_dirty();
            }
            UndoRecord::Nothing => {}
        }
    }
}
