mod confidence;
mod keyword_set;
mod reconcile;
mod sequencer;
mod wire;
