/// Options of a drawing [`Session`](crate::drawing::Session).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Keep a [`Placement`](crate::drawing_blocks::shift::Placement) record, with the shifted
    /// vertices, for every layout step.
    pub record_moves: bool,
    /// Extract a Kuratowski witness when the input is not planar. Runs O(m) planarity tests, O(m²) time overall.
    pub planarity_witness: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            record_moves: true,
            planarity_witness: false,
        }
    }
}

impl Config {
    pub fn with_record_moves(mut self, record_moves: bool) -> Self {
        self.record_moves = record_moves;
        self
    }

    pub fn with_planarity_witness(mut self, planarity_witness: bool) -> Self {
        self.planarity_witness = planarity_witness;
        self
    }
}
