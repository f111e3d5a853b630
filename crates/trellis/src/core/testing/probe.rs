use std::sync::{Arc, Mutex};

use crate::{LayoutContext, control::Control, error::Result, geom::Size};

/// Shared record of the available sizes a [`Probe`] was measured against.
pub type MeasureLog = Arc<Mutex<Vec<Size>>>;

/// A fixed-size leaf that records every call to its measure hook.
pub struct Probe {
    /// Content size returned from measure.
    size: Size,
    /// Measure calls, in order.
    log: MeasureLog,
}

impl Probe {
    /// Construct a probe and the handle to its measure log.
    pub fn new(size: Size) -> (Self, MeasureLog) {
        let log = MeasureLog::default();
        (
            Self {
                size,
                log: Arc::clone(&log),
            },
            log,
        )
    }
}

impl Control for Probe {
    fn measure(&mut self, ctx: &mut LayoutContext<'_>, available: Size) -> Result<Size> {
        if let Ok(mut log) = self.log.lock() {
            log.push(available);
        }
        Ok(self.size.grow(ctx.layout().padding))
    }

    fn arrange(&mut self, _ctx: &mut LayoutContext<'_>, size: Size) -> Result<Size> {
        Ok(size)
    }
}

/// A leaf whose height depends on the width it is offered, like wrapped text
/// covering a fixed number of cells.
pub struct Wrap {
    /// Number of cells to cover.
    area: u32,
}

impl Wrap {
    /// Construct a leaf covering `area` cells.
    pub fn new(area: u32) -> Self {
        Self { area }
    }
}

impl Control for Wrap {
    fn measure(&mut self, ctx: &mut LayoutContext<'_>, available: Size) -> Result<Size> {
        let padding = ctx.layout().padding;
        if self.area == 0 {
            return Ok(Size::ZERO.grow(padding));
        }
        let w = available.shrink(padding).w.clamp(1, self.area);
        Ok(Size::new(w, self.area.div_ceil(w)).grow(padding))
    }

    fn arrange(&mut self, _ctx: &mut LayoutContext<'_>, size: Size) -> Result<Size> {
        Ok(size)
    }
}
