// Entity Models - session-scoped registries own these, never ambient globals
//
// Each entity has:
// - An integer id, unique within one session (assigned by the session)
// - Plain values that the interaction log mutates between computations

pub mod participant;
pub mod plate;

pub use participant::Participant;
pub use plate::PlateType;
