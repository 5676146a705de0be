pub mod bar_chart;
mod fonts;
