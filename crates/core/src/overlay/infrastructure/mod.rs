pub mod channel_overlay;
