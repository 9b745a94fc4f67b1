pub mod drawback;
