use crate::comparator::setup::Comparator;

impl Comparator {
    /// Handle a pointer move over the canvas.
    ///
    /// Positions outside the canvas (bounds inclusive) are ignored so the
    /// divider cannot be dragged off the frame. The split is updated
    /// immediately but the repaint is deferred to the scheduler, keeping
    /// input handling cheap under high-frequency pointer streams; the
    /// deferred repaint reads whatever split is current when it runs.
    pub fn pointer_moved(&self, x: f64, y: f64) {
        if x < 0.0 || x > f64::from(self.frame_width) || y < 0.0 || y > f64::from(self.frame_height)
        {
            return;
        }
        self.context.borrow_mut().split = crate::foundation::core::Point::new(x, y);
        self.defer_repaint();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/comparator/interaction.rs"]
mod tests;
