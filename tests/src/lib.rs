#[cfg(test)]
mod util;

#[cfg(test)]
mod api;
#[cfg(test)]
mod orchestration;
#[cfg(test)]
mod websocket;
