/// Upload sniffing and decoding into [`decode::SourceImage`].
pub mod decode;
