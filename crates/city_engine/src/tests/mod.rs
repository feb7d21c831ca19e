//! Cross-module scenarios driving the whole frame scheduler

mod click_scenarios;
mod frame_scenarios;
