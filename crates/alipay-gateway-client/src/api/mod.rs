//! One `impl AlipayClient` block per gateway product line.

mod bill;
mod royalty;
mod smile;
mod trade;
