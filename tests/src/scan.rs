mod concurrency;
mod loopback;
