pub mod scale_sm;
