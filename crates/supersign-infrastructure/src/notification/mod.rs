mod serverchan;

pub use serverchan::ServerChanSender;
