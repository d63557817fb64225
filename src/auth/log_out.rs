//! Log-out route handler that invalidates the auth cookie and redirects users.

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::PrivateCookieJar;

use crate::{auth::cookie::invalidate_auth_cookie, endpoints};

/// Invalidate the auth cookie and redirect the client to the log-in page.
pub async fn get_log_out(jar: PrivateCookieJar) -> Response {
    let jar = invalidate_auth_cookie(jar);

    (jar, Redirect::to(endpoints::LOG_IN_VIEW)).into_response()
}

#[cfg(test)]
mod log_out_tests {
    use axum::http::{StatusCode, header::SET_COOKIE};
    use axum_extra::extract::{
        PrivateCookieJar,
        cookie::{Cookie, Key},
    };
    use sha2::{Digest, Sha512};
    use time::{Duration, OffsetDateTime};

    use crate::{
        auth::{
            DEFAULT_COOKIE_DURATION,
            cookie::{COOKIE_TOKEN, set_auth_cookie},
            log_out::get_log_out,
        },
        endpoints,
        test_utils::test_user,
    };

    #[tokio::test]
    async fn log_out_invalidates_auth_cookie_and_redirects() {
        let key = Key::from(&Sha512::digest("42"));
        let jar = set_auth_cookie(
            PrivateCookieJar::new(key),
            &test_user(),
            DEFAULT_COOKIE_DURATION,
        )
        .unwrap();

        let response = get_log_out(jar).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get("location").unwrap(),
            endpoints::LOG_IN_VIEW
        );

        let token_cookie = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .map(|header| Cookie::parse(header.to_str().unwrap().to_owned()).unwrap())
            .find(|cookie| cookie.name() == COOKIE_TOKEN)
            .expect("want the token cookie to be overwritten");
        assert_eq!(
            token_cookie.expires_datetime(),
            Some(OffsetDateTime::UNIX_EPOCH)
        );
        assert_eq!(token_cookie.max_age(), Some(Duration::ZERO));
    }
}
