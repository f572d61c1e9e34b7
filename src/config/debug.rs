//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so runs
//! stay quiet. Each flag is further gated by `cfg(debug_assertions)`.

pub struct DebugFlags {
    /// Emit the per-rule delta breakdown of every confidence score.
    pub print_rule_breakdown: bool,
    /// Emit a line for every symbol skipped because its source file is absent.
    pub print_skipped_symbols: bool,
    /// Emit row counts and paths as each snapshot table is written.
    pub print_table_writes: bool,
    /// If non-empty, emit the full snapshot for this symbol only.
    /// Example: "NIFTY50". Use "" to disable.
    pub print_snapshot_for_symbol: &'static str,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_rule_breakdown: false,
    print_skipped_symbols: false,
    print_table_writes: true,
    print_snapshot_for_symbol: "",
};
