use anyhow::Context;
use tubelet_api::{
    AuthToken, Comment, CommentId, CommentPatch, Error, NewComment, NewSession, NewUser, UserId,
    Uuid, Video, VideoId,
};

#[derive(structopt::StructOpt)]
struct Opt {
    #[structopt(short, long)]
    host: String,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(structopt::StructOpt)]
enum Command {
    /// Create a user (requires ADMIN_TOKEN in the environment)
    CreateUser {
        /// Username
        username: String,

        /// Account email, used to log in
        email: String,

        /// Initial password
        initial_password: String,
    },

    /// Log in and print the session token
    Login {
        email: String,
        password: String,
    },

    /// List videos, newest first
    Videos,

    /// List the comments of a video, newest first
    Comments { video_id: Uuid },

    /// Post a comment (requires SESSION_TOKEN in the environment)
    PostComment {
        video_id: Uuid,

        /// Comment body
        text: String,

        /// Comment id to reply to
        #[structopt(long)]
        parent: Option<Uuid>,
    },

    /// Edit one of your comments (requires SESSION_TOKEN in the environment)
    EditComment { comment_id: Uuid, text: String },

    /// Delete one of your comments and all its replies (requires
    /// SESSION_TOKEN in the environment)
    DeleteComment { comment_id: Uuid },
}

fn admin_token() -> anyhow::Result<AuthToken> {
    let tok =
        std::env::var("ADMIN_TOKEN").context("retrieving ADMIN_TOKEN environment variable")?;
    let tok = Uuid::try_parse(&tok).context("parsing ADMIN_TOKEN as an auth token")?;
    Ok(AuthToken(tok))
}

fn session_token() -> anyhow::Result<AuthToken> {
    let tok =
        std::env::var("SESSION_TOKEN").context("retrieving SESSION_TOKEN environment variable")?;
    let tok = Uuid::try_parse(&tok).context("parsing SESSION_TOKEN as an auth token")?;
    Ok(AuthToken(tok))
}

/// Turns non-success responses into the server's own error taxonomy when
/// the body parses as one
async fn checked(resp: reqwest::Response) -> anyhow::Result<reqwest::Response> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status();
    let body = resp.bytes().await.context("reading error response body")?;
    match Error::parse(&body) {
        Ok(e) => Err(anyhow::Error::new(e)),
        Err(_) => Err(anyhow::anyhow!("server answered with status {status}")),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let opt = <Opt as structopt::StructOpt>::from_args();

    let client = reqwest::Client::new();

    match opt.cmd {
        Command::CreateUser {
            username,
            email,
            initial_password,
        } => {
            let resp = client
                .post(format!("{}/api/v1/admin/create-user", opt.host))
                .json(&NewUser::new(
                    UserId(Uuid::new_v4()),
                    username,
                    email,
                    &initial_password,
                ))
                .bearer_auth(admin_token()?.0)
                .send()
                .await?;
            checked(resp).await?;
        }
        Command::Login { email, password } => {
            let resp = client
                .post(format!("{}/api/v1/auth/login", opt.host))
                .json(&NewSession::new(
                    email,
                    password,
                    String::from("tubelet-ctl"),
                ))
                .send()
                .await?;
            let tok: AuthToken = checked(resp).await?.json().await?;
            println!("{}", tok.0);
        }
        Command::Videos => {
            let resp = client
                .get(format!("{}/api/v1/videos/", opt.host))
                .send()
                .await?;
            let videos: Vec<Video> = checked(resp).await?.json().await?;
            for v in videos {
                println!(
                    "{}  {:>8} views  {}  (by {})",
                    v.id.0, v.views, v.title, v.uploader.username
                );
            }
        }
        Command::Comments { video_id } => {
            let resp = client
                .get(format!("{}/api/v1/comments/video/{}", opt.host, video_id))
                .send()
                .await?;
            let comments: Vec<Comment> = checked(resp).await?.json().await?;
            for c in comments {
                let reply = match c.parent_id {
                    Some(p) => format!(" (reply to {})", p.0),
                    None => String::new(),
                };
                println!("{}  [{}] {}{}: {}", c.id.0, c.timestamp, c.username, reply, c.text);
            }
        }
        Command::PostComment {
            video_id,
            text,
            parent,
        } => {
            let body = NewComment {
                video_id: VideoId(video_id),
                text,
                parent_id: parent.map(CommentId),
            };
            body.validate()?;
            let resp = client
                .post(format!("{}/api/v1/comments/create", opt.host))
                .json(&body)
                .bearer_auth(session_token()?.0)
                .send()
                .await?;
            let posted: Comment = checked(resp).await?.json().await?;
            println!("{}", posted.id.0);
        }
        Command::EditComment { comment_id, text } => {
            let body = CommentPatch { text };
            body.validate()?;
            let resp = client
                .patch(format!("{}/api/v1/comments/{}", opt.host, comment_id))
                .json(&body)
                .bearer_auth(session_token()?.0)
                .send()
                .await?;
            checked(resp).await?;
        }
        Command::DeleteComment { comment_id } => {
            let resp = client
                .delete(format!("{}/api/v1/comments/{}", opt.host, comment_id))
                .bearer_auth(session_token()?.0)
                .send()
                .await?;
            checked(resp).await?;
        }
    }

    Ok(())
}
