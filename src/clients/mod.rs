pub(crate) mod chat;
pub mod deepseek;
pub mod fallback;
pub mod flexible;
pub mod groq;
pub mod mock;

pub use deepseek::{DeepSeekClient, DeepSeekConfig, DeepSeekModel};
pub use fallback::FallbackClient;
pub use flexible::{ClientType, FlexibleClient};
pub use groq::{GroqClient, GroqConfig, GroqModel};
pub use mock::{MockClient, MockHandle, MockResponse, SampleClient};
