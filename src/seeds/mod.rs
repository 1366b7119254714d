pub mod feed_seed;
