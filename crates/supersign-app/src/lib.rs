// Application layer - orchestration of the checkin flow
// Wires domain ports to the scheduler, retry, dispatch and reporting logic

pub mod application;
