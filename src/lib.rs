use worker::*;

mod config;
mod handlers;
mod resolver;
mod router;
mod utils;

use router::Route;

#[event(fetch)]
async fn fetch(req: Request, env: Env, _ctx: Context) -> Result<Response> {
    console_error_panic_hook::set_once();

    let method = req.method();
    let path = req.path();
    let route = Route::resolve(&method, &path);
    console_log!("[router] {:?} {} -> {:?}", method, path, route);

    match route {
        Route::Preflight => handlers::preflight::handle(),
        Route::Search => handlers::search::handle(req, env).await,
        Route::Info => handlers::info::handle(req, env).await,
        Route::NotFound => handlers::not_found(),
    }
}
