safe_index::new! {
    /// Repository slot index.
    Slot,
    /// Maps a [`Slot`] to something.
    map: SlotMap,
}
